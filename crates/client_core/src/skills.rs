//! Skills section: category filter over the bundled dataset and staggered
//! per-card reveal timers.

use std::{sync::Arc, time::Duration};

use shared::domain::{CategoryFilter, ProficiencyTier, Skill};
use tokio::sync::{broadcast, watch};
use tracing::debug;

use crate::{events::SkillsEvent, timer::OneShotTimer};

pub const DEFAULT_REVEAL_STAGGER: Duration = Duration::from_millis(100);

/// Skills matching `filter`, in dataset order.
pub fn compute_visible_skills(all: &[Skill], filter: CategoryFilter) -> Vec<&Skill> {
    all.iter()
        .filter(|skill| filter.matches(skill.category))
        .collect()
}

pub fn reveal_delay(index: usize, stagger: Duration) -> Duration {
    stagger.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

/// A mounted card. Dropping it cancels a reveal that has not fired yet.
pub struct SkillCard {
    skill: Skill,
    index: usize,
    visible: Arc<watch::Sender<bool>>,
    timer: Option<OneShotTimer>,
}

impl SkillCard {
    fn mount(
        skill: Skill,
        index: usize,
        stagger: Duration,
        events: broadcast::Sender<SkillsEvent>,
    ) -> Self {
        let (visible, _) = watch::channel(false);
        let mut card = Self {
            skill,
            index,
            visible: Arc::new(visible),
            timer: None,
        };
        card.schedule_reveal(stagger, events);
        card
    }

    fn schedule_reveal(&mut self, stagger: Duration, events: broadcast::Sender<SkillsEvent>) {
        let visible = self.visible.clone();
        let name = self.skill.name.clone();
        let index = self.index;
        self.timer = Some(OneShotTimer::schedule(
            reveal_delay(index, stagger),
            move || {
                if !visible.send_replace(true) {
                    debug!(skill = %name, index, "skills: card revealed");
                    let _ = events.send(SkillsEvent::CardRevealed { name, index });
                }
            },
        ));
    }

    /// Moves the card to a new grid position. Only a hidden card is rescheduled.
    fn reposition(
        &mut self,
        index: usize,
        stagger: Duration,
        events: broadcast::Sender<SkillsEvent>,
    ) {
        if self.index == index {
            return;
        }
        self.index = index;
        if !self.is_visible() {
            self.schedule_reveal(stagger, events);
        }
    }

    pub fn skill(&self) -> &Skill {
        &self.skill
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_visible(&self) -> bool {
        *self.visible.borrow()
    }

    pub fn is_reveal_pending(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_settled())
    }

    pub fn tier(&self) -> ProficiencyTier {
        self.skill.tier()
    }

    pub fn watch_visible(&self) -> watch::Receiver<bool> {
        self.visible.subscribe()
    }
}

pub struct SkillsController {
    all: Arc<[Skill]>,
    active: CategoryFilter,
    mounted: bool,
    stagger: Duration,
    cards: Vec<SkillCard>,
    events: broadcast::Sender<SkillsEvent>,
}

impl SkillsController {
    pub fn new(all: impl Into<Arc<[Skill]>>) -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            all: all.into(),
            active: CategoryFilter::All,
            mounted: false,
            stagger: DEFAULT_REVEAL_STAGGER,
            cards: Vec::new(),
            events,
        }
    }

    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SkillsEvent> {
        self.events.subscribe()
    }

    /// Mounts the grid and starts the reveal timers. Needs a tokio runtime.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.reconcile();
    }

    /// Drops every card, cancelling pending reveals.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.cards.clear();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn active_category(&self) -> CategoryFilter {
        self.active
    }

    pub fn set_category(&mut self, filter: CategoryFilter) {
        self.active = filter;
        debug!(category = %filter, "skills: category selected");
        let _ = self.events.send(SkillsEvent::CategoryChanged(filter));
        if self.mounted {
            self.reconcile();
        }
    }

    pub fn visible_skills(&self) -> Vec<&Skill> {
        compute_visible_skills(&self.all, self.active)
    }

    pub fn cards(&self) -> &[SkillCard] {
        &self.cards
    }

    pub fn card(&self, name: &str) -> Option<&SkillCard> {
        self.cards.iter().find(|card| card.skill.name == name)
    }

    /// Cards are keyed by skill name: survivors keep their reveal state,
    /// newcomers get a fresh timer, and cards filtered out are dropped.
    fn reconcile(&mut self) {
        let visible: Vec<Skill> = self.visible_skills().into_iter().cloned().collect();
        let mut previous = std::mem::take(&mut self.cards);
        let mut next = Vec::with_capacity(visible.len());

        for (index, skill) in visible.into_iter().enumerate() {
            match previous.iter().position(|card| card.skill.name == skill.name) {
                Some(at) => {
                    let mut card = previous.swap_remove(at);
                    card.reposition(index, self.stagger, self.events.clone());
                    next.push(card);
                }
                None => next.push(SkillCard::mount(
                    skill,
                    index,
                    self.stagger,
                    self.events.clone(),
                )),
            }
        }

        debug!(
            mounted = next.len(),
            unmounted = previous.len(),
            "skills: cards reconciled"
        );
        self.cards = next;
    }
}

#[cfg(test)]
#[path = "tests/skills_tests.rs"]
mod tests;
