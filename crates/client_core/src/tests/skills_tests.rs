use shared::{catalog::portfolio_skills, domain::SkillCategory};
use tokio::sync::broadcast::error::TryRecvError;

use super::*;

fn sample() -> Vec<Skill> {
    vec![
        Skill::new("Python", SkillCategory::Programming, 92),
        Skill::new("Excel", SkillCategory::Tools, 80),
        Skill::new("SQL", SkillCategory::Programming, 70),
        Skill::new("Regression", SkillCategory::Analysis, 55),
        Skill::new("Rust", SkillCategory::Programming, 61),
    ]
}

fn names<'a>(skills: impl IntoIterator<Item = &'a Skill>) -> Vec<&'a str> {
    skills.into_iter().map(|skill| skill.name.as_str()).collect()
}

fn revealed(rx: &mut broadcast::Receiver<SkillsEvent>) -> Vec<(String, usize)> {
    let mut out = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(SkillsEvent::CardRevealed { name, index }) => out.push((name, index)),
            Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return out,
        }
    }
}

async fn advance_to(start: tokio::time::Instant, millis: u64) {
    tokio::time::sleep_until(start + Duration::from_millis(millis)).await;
}

#[test]
fn filter_keeps_matching_skills_in_source_order() {
    let all = sample();

    let programming =
        compute_visible_skills(&all, CategoryFilter::Only(SkillCategory::Programming));
    assert_eq!(names(programming), vec!["Python", "SQL", "Rust"]);

    let visualization =
        compute_visible_skills(&all, CategoryFilter::Only(SkillCategory::Visualization));
    assert!(visualization.is_empty());

    assert_eq!(
        names(compute_visible_skills(&all, CategoryFilter::All)),
        names(&all)
    );
}

#[test]
fn filter_is_stable_across_calls_for_every_tab() {
    let all = portfolio_skills();
    for tab in CategoryFilter::tabs() {
        let first = compute_visible_skills(&all, tab);
        let second = compute_visible_skills(&all, tab);
        assert_eq!(first, second);
        assert!(first.iter().all(|skill| tab.matches(skill.category)));
        assert_eq!(
            first.len(),
            all.iter().filter(|skill| tab.matches(skill.category)).count()
        );
    }
}

#[test]
fn controller_defaults_to_all_and_switches_category() {
    let mut controller = SkillsController::new(sample());
    assert_eq!(controller.active_category(), CategoryFilter::All);
    assert_eq!(controller.visible_skills().len(), 5);

    controller.set_category(CategoryFilter::Only(SkillCategory::Tools));
    assert_eq!(names(controller.visible_skills()), vec!["Excel"]);
    assert!(controller.cards().is_empty(), "not mounted yet");
}

#[tokio::test(start_paused = true)]
async fn cards_reveal_staggered_by_index() {
    let start = tokio::time::Instant::now();
    let mut controller = SkillsController::new(sample());
    let mut rx = controller.subscribe_events();
    controller.mount();
    assert!(controller.is_mounted());
    assert_eq!(controller.cards().len(), 5);
    assert!(controller.cards().iter().all(|card| !card.is_visible()));

    advance_to(start, 1).await;
    assert!(controller.cards()[0].is_visible());
    assert!(!controller.cards()[1].is_visible());

    advance_to(start, 399).await;
    assert!(controller.cards()[3].is_visible());
    assert!(!controller.cards()[4].is_visible());
    assert!(controller.cards()[4].is_reveal_pending());

    advance_to(start, 401).await;
    assert!(controller.cards()[4].is_visible());

    advance_to(start, 2000).await;
    assert_eq!(
        revealed(&mut rx),
        vec![
            ("Python".to_string(), 0),
            ("Excel".to_string(), 1),
            ("SQL".to_string(), 2),
            ("Regression".to_string(), 3),
            ("Rust".to_string(), 4),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn filtering_out_a_pending_card_cancels_its_reveal() {
    let start = tokio::time::Instant::now();
    let mut controller = SkillsController::new(sample());
    let mut rx = controller.subscribe_events();
    controller.mount();

    controller.set_category(CategoryFilter::Only(SkillCategory::Programming));
    assert_eq!(
        names(controller.cards().iter().map(SkillCard::skill)),
        vec!["Python", "SQL", "Rust"]
    );

    advance_to(start, 150).await;
    assert!(controller.card("SQL").expect("sql").is_visible());
    assert!(!controller.card("Rust").expect("rust").is_visible());

    advance_to(start, 201).await;
    assert!(controller.card("Rust").expect("rust").is_visible());

    advance_to(start, 1000).await;
    let revealed = revealed(&mut rx);
    assert_eq!(
        revealed,
        vec![
            ("Python".to_string(), 0),
            ("SQL".to_string(), 1),
            ("Rust".to_string(), 2),
        ]
    );
    assert!(controller.card("Excel").is_none());
}

#[tokio::test(start_paused = true)]
async fn revealed_cards_stay_visible_across_filter_changes() {
    let start = tokio::time::Instant::now();
    let mut controller = SkillsController::new(sample());
    let mut rx = controller.subscribe_events();
    controller.mount();
    advance_to(start, 1000).await;
    assert_eq!(revealed(&mut rx).len(), 5);

    controller.set_category(CategoryFilter::Only(SkillCategory::Programming));
    let sql = controller.card("SQL").expect("sql");
    assert_eq!(sql.index(), 1);
    assert!(sql.is_visible());

    advance_to(start, 2000).await;
    assert!(revealed(&mut rx).is_empty(), "no card reveals twice");

    controller.set_category(CategoryFilter::All);
    let excel = controller.card("Excel").expect("remounted");
    assert!(!excel.is_visible(), "remounted card starts hidden");

    advance_to(start, 2101).await;
    assert!(controller.card("Excel").expect("excel").is_visible());
    assert!(!controller.card("Regression").expect("regression").is_visible());

    advance_to(start, 2301).await;
    assert_eq!(
        revealed(&mut rx),
        vec![("Excel".to_string(), 1), ("Regression".to_string(), 3)]
    );
}

#[tokio::test(start_paused = true)]
async fn unmount_cancels_pending_reveals() {
    let start = tokio::time::Instant::now();
    let mut controller = SkillsController::new(sample());
    let mut rx = controller.subscribe_events();
    controller.mount();
    advance_to(start, 150).await;
    assert_eq!(revealed(&mut rx).len(), 2);

    controller.unmount();
    assert!(controller.cards().is_empty());

    advance_to(start, 1000).await;
    assert!(revealed(&mut rx).is_empty());
}

#[tokio::test(start_paused = true)]
async fn visibility_can_be_awaited() {
    let mut controller = SkillsController::new(sample()).with_stagger(Duration::from_millis(50));
    controller.mount();
    let started = tokio::time::Instant::now();

    let mut visible = controller.cards()[4].watch_visible();
    visible.wait_for(|shown| *shown).await.expect("revealed");

    assert!(started.elapsed() >= Duration::from_millis(200));
}
