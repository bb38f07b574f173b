//! The navigation state machine.

use super::{Event, Mode, NavigationFrame, NavigationStack, Notice, Transition, View};
use crate::hierarchy::{children_of, primary_emotions};
use crate::models::{Emotion, EmotionSet, LogEntry};
use crate::storage::Journal;
use chrono::Utc;
use std::sync::Arc;

/// Dual-mode navigation session over one emotion set.
///
/// Holds the browsing stack for the whole session and a logging stack only
/// while logging is active. Exactly one stack is rendered at a time.
pub struct NavigationController {
    emotions: EmotionSet,
    primaries: Vec<Emotion>,
    mode: Mode,
    browsing: NavigationStack,
    logging: Option<NavigationStack>,
    journal: Arc<dyn Journal>,
}

impl NavigationController {
    /// Start a session in browsing mode at the primary emotions.
    pub fn new(emotions: EmotionSet, journal: Arc<dyn Journal>) -> Self {
        let primaries = primary_emotions(&emotions);
        if primaries.is_empty() {
            tracing::warn!("no primary emotions found");
        }
        tracing::debug!(count = primaries.len(), "found primary emotions");

        let root = NavigationFrame::root(Mode::Browsing, primaries.clone());
        let browsing = NavigationStack::new(root);
        Self {
            emotions,
            primaries,
            mode: Mode::Browsing,
            browsing,
            logging: None,
            journal,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn emotions(&self) -> &EmotionSet {
        &self.emotions
    }

    /// The browsing stack, retained across logging sessions.
    pub fn browsing_stack(&self) -> &NavigationStack {
        &self.browsing
    }

    /// The logging stack, present only while logging.
    pub fn logging_stack(&self) -> Option<&NavigationStack> {
        self.logging.as_ref()
    }

    /// The stack being rendered.
    pub fn active_stack(&self) -> &NavigationStack {
        match (&self.mode, &self.logging) {
            (Mode::Logging, Some(stack)) => stack,
            _ => &self.browsing,
        }
    }

    /// The frame being rendered.
    pub fn current_frame(&self) -> &NavigationFrame {
        self.active_stack().top()
    }

    /// What the presentation layer should show right now.
    pub fn view(&self) -> View {
        let stack = self.active_stack();
        View {
            mode: self.mode,
            window_title: self.mode.window_title(),
            frame: stack.top().clone(),
            back_enabled: !stack.at_root(),
        }
    }

    /// Apply one event and describe the result.
    pub fn dispatch(&mut self, event: Event) -> Transition {
        let notice = match event {
            Event::ItemSelected(emotion) => self.item_selected(emotion),
            Event::BackRequested => self.back_requested(),
            Event::EnterLogging => self.enter_logging(),
            Event::ExitToBrowsing => self.exit_to_browsing(),
        };
        Transition {
            view: self.view(),
            notice,
        }
    }

    fn active_stack_mut(&mut self) -> &mut NavigationStack {
        match (&self.mode, &mut self.logging) {
            (Mode::Logging, Some(stack)) => stack,
            _ => &mut self.browsing,
        }
    }

    fn item_selected(&mut self, emotion: Emotion) -> Notice {
        let children = children_of(&emotion.id, &self.emotions);
        tracing::debug!(
            mode = %self.mode,
            emotion = %emotion,
            children = children.len(),
            "emotion selected"
        );

        if !children.is_empty() {
            let frame = NavigationFrame::child(self.mode, emotion, children);
            let stack = self.active_stack_mut();
            stack.push(frame);
            tracing::debug!(depth = stack.len(), "pushed frame");
            return Notice::None;
        }

        match self.mode {
            Mode::Browsing => {
                tracing::debug!(emotion = %emotion, "leaf reached while browsing");
                Notice::LeafReached { emotion }
            }
            Mode::Logging => {
                let notice = self.save(emotion);
                self.leave_logging();
                notice
            }
        }
    }

    fn save(&self, emotion: Emotion) -> Notice {
        let entry = LogEntry::new(&emotion, Utc::now());
        match self.journal.append(entry.clone()) {
            Ok(()) => {
                tracing::info!(emotion = %emotion, "logged emotion");
                Notice::Logged { entry }
            }
            Err(e) => {
                tracing::error!(emotion = %emotion, error = %e, "failed to save journal entry");
                Notice::SaveFailed {
                    emotion,
                    error: e.to_string(),
                }
            }
        }
    }

    fn back_requested(&mut self) -> Notice {
        let stack = self.active_stack_mut();
        if stack.pop().is_some() {
            tracing::debug!(depth = stack.len(), "popped frame");
            return Notice::None;
        }

        match self.mode {
            Mode::Logging => {
                tracing::debug!("back at logging root, cancelling logging");
                self.leave_logging();
                Notice::LoggingCancelled
            }
            Mode::Browsing => Notice::None,
        }
    }

    fn enter_logging(&mut self) -> Notice {
        if self.mode == Mode::Logging {
            tracing::debug!("already in logging mode");
            return Notice::None;
        }

        self.logging = Some(NavigationStack::new(NavigationFrame::root(
            Mode::Logging,
            self.primaries.clone(),
        )));
        self.mode = Mode::Logging;
        tracing::info!("switched to logging mode");
        Notice::None
    }

    fn exit_to_browsing(&mut self) -> Notice {
        if self.mode == Mode::Browsing {
            tracing::debug!("already in browsing mode");
            return Notice::None;
        }
        self.leave_logging();
        Notice::LoggingCancelled
    }

    fn leave_logging(&mut self) {
        self.logging = None;
        self.mode = Mode::Browsing;
        tracing::info!(depth = self.browsing.len(), "switched to browsing mode");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_embedded;
    use crate::test_utils::{TestEnv, small_wheel};
    use crate::{Error, Result};
    use std::sync::Mutex;

    /// Journal that records entries in memory, optionally refusing them.
    #[derive(Default)]
    struct MemoryJournal {
        entries: Mutex<Vec<LogEntry>>,
        fail: bool,
    }

    impl Journal for MemoryJournal {
        fn append(&self, entry: LogEntry) -> Result<()> {
            if self.fail {
                return Err(Error::Journal("disk full".to_string()));
            }
            self.entries.lock().unwrap().push(entry);
            Ok(())
        }

        fn load_all(&self) -> Result<Vec<LogEntry>> {
            Ok(self.entries.lock().unwrap().clone())
        }

        fn location(&self) -> String {
            "memory".to_string()
        }
    }

    fn controller() -> (NavigationController, Arc<MemoryJournal>) {
        let journal = Arc::new(MemoryJournal::default());
        (NavigationController::new(small_wheel(), journal.clone()), journal)
    }

    fn select(nav: &mut NavigationController, id: &str) -> Transition {
        let emotion = nav.emotions()[id].clone();
        nav.dispatch(Event::ItemSelected(emotion))
    }

    fn item_ids(frame: &NavigationFrame) -> Vec<&str> {
        frame.items.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_startup_shows_browsing_root() {
        let (nav, _) = controller();
        let view = nav.view();

        assert_eq!(view.mode, Mode::Browsing);
        assert_eq!(view.window_title, "Emotion Explorer");
        assert_eq!(view.frame.title, "Primary Emotions");
        assert!(view.frame.parent.is_none());
        assert_eq!(item_ids(&view.frame), vec!["joy", "sadness"]);
        assert!(!view.back_enabled);
        assert!(nav.logging_stack().is_none());
    }

    #[test]
    fn test_select_non_leaf_pushes_one_frame() {
        let (mut nav, _) = controller();
        let t = select(&mut nav, "joy");

        assert_eq!(t.notice, Notice::None);
        assert_eq!(nav.browsing_stack().len(), 2);
        assert_eq!(t.view.frame.title, "Exploring: Joy");
        assert_eq!(t.view.frame.parent.as_ref().map(|e| e.id.as_str()), Some("joy"));
        assert_eq!(item_ids(&t.view.frame), vec!["contentment"]);
        assert!(t.view.back_enabled);
    }

    #[test]
    fn test_select_then_back_restores_root() {
        let (mut nav, _) = controller();
        let initial = nav.view();

        select(&mut nav, "joy");
        let t = nav.dispatch(Event::BackRequested);

        assert_eq!(nav.browsing_stack().len(), 1);
        assert_eq!(t.view, initial);
    }

    #[test]
    fn test_browsing_leaf_does_not_mutate_stack() {
        let (mut nav, journal) = controller();
        select(&mut nav, "joy");
        let before = nav.browsing_stack().clone();

        let t = select(&mut nav, "contentment");
        assert_eq!(nav.browsing_stack().len(), 3);

        let t2 = select(&mut nav, "serenity");
        assert!(matches!(
            t2.notice,
            Notice::LeafReached { ref emotion } if emotion.id == "serenity"
        ));
        assert_eq!(nav.browsing_stack().len(), 3);
        assert_eq!(t2.view, t.view);
        assert_ne!(nav.browsing_stack(), &before);
        assert!(journal.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_browsing_leaf_at_root() {
        let (mut nav, _) = controller();
        let t = select(&mut nav, "sadness");

        assert!(matches!(t.notice, Notice::LeafReached { .. }));
        assert_eq!(nav.browsing_stack().len(), 1);
        assert_eq!(nav.mode(), Mode::Browsing);
    }

    #[test]
    fn test_back_at_browsing_root_is_noop() {
        let (mut nav, _) = controller();
        let initial = nav.view();

        let t = nav.dispatch(Event::BackRequested);
        assert_eq!(t.notice, Notice::None);
        assert_eq!(t.view, initial);
        assert_eq!(nav.browsing_stack().len(), 1);
    }

    #[test]
    fn test_enter_logging_builds_fresh_root() {
        let (mut nav, _) = controller();
        let t = nav.dispatch(Event::EnterLogging);

        assert_eq!(t.view.mode, Mode::Logging);
        assert_eq!(t.view.window_title, "Emotion Explorer - Logging...");
        assert_eq!(t.view.frame.title, "Select Feeling to Log");
        assert_eq!(item_ids(&t.view.frame), vec!["joy", "sadness"]);
        assert!(!t.view.back_enabled);
        assert_eq!(nav.logging_stack().map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_enter_logging_twice_is_noop() {
        let (mut nav, _) = controller();
        nav.dispatch(Event::EnterLogging);
        select(&mut nav, "joy");

        let t = nav.dispatch(Event::EnterLogging);
        assert_eq!(t.notice, Notice::None);
        assert_eq!(nav.logging_stack().map(|s| s.len()), Some(2));
        assert_eq!(t.view.frame.title, "Log > Joy > ...");
    }

    #[test]
    fn test_enter_logging_then_back_cancels() {
        let (mut nav, journal) = controller();
        select(&mut nav, "joy");
        let browsing_before = nav.browsing_stack().clone();
        let view_before = nav.view();

        nav.dispatch(Event::EnterLogging);
        let t = nav.dispatch(Event::BackRequested);

        assert_eq!(t.notice, Notice::LoggingCancelled);
        assert_eq!(nav.mode(), Mode::Browsing);
        assert!(nav.logging_stack().is_none());
        assert_eq!(nav.browsing_stack(), &browsing_before);
        assert_eq!(t.view, view_before);
        assert!(journal.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_logging_navigation_leaves_browsing_untouched() {
        let (mut nav, _) = controller();
        let browsing_before = nav.browsing_stack().clone();

        nav.dispatch(Event::EnterLogging);
        select(&mut nav, "joy");
        select(&mut nav, "contentment");
        nav.dispatch(Event::BackRequested);

        assert_eq!(nav.logging_stack().map(|s| s.len()), Some(2));
        assert_eq!(nav.browsing_stack(), &browsing_before);
    }

    #[test]
    fn test_logging_leaf_saves_and_returns_to_browsing() {
        let (mut nav, journal) = controller();
        select(&mut nav, "joy");
        let view_before = nav.view();

        nav.dispatch(Event::EnterLogging);
        select(&mut nav, "joy");
        select(&mut nav, "contentment");
        let before = Utc::now();
        let t = select(&mut nav, "serenity");
        let after = Utc::now();

        let entries = journal.load_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].emotion_id, "serenity");
        assert_eq!(entries[0].emotion_name, "Serenity");
        assert!(entries[0].timestamp >= before && entries[0].timestamp <= after);
        assert_eq!(t.notice, Notice::Logged { entry: entries[0].clone() });

        assert_eq!(nav.mode(), Mode::Browsing);
        assert!(nav.logging_stack().is_none());
        assert_eq!(t.view, view_before);
    }

    #[test]
    fn test_logging_leaf_at_root_saves() {
        let (mut nav, journal) = controller();
        nav.dispatch(Event::EnterLogging);
        let t = select(&mut nav, "sadness");

        assert!(matches!(t.notice, Notice::Logged { .. }));
        assert_eq!(journal.load_all().unwrap().len(), 1);
        assert_eq!(t.view.mode, Mode::Browsing);
    }

    #[test]
    fn test_save_failure_still_returns_to_browsing() {
        let journal = Arc::new(MemoryJournal {
            fail: true,
            ..Default::default()
        });
        let mut nav = NavigationController::new(small_wheel(), journal.clone());
        let view_before = nav.view();

        nav.dispatch(Event::EnterLogging);
        let t = select(&mut nav, "sadness");

        match t.notice {
            Notice::SaveFailed { emotion, error } => {
                assert_eq!(emotion.id, "sadness");
                assert!(error.contains("disk full"));
            }
            other => panic!("expected SaveFailed, got {:?}", other),
        }
        assert_eq!(nav.mode(), Mode::Browsing);
        assert_eq!(t.view, view_before);
    }

    #[test]
    fn test_exit_to_browsing_discards_logging() {
        let (mut nav, journal) = controller();
        nav.dispatch(Event::EnterLogging);
        select(&mut nav, "joy");

        let t = nav.dispatch(Event::ExitToBrowsing);
        assert_eq!(t.notice, Notice::LoggingCancelled);
        assert_eq!(t.view.mode, Mode::Browsing);
        assert_eq!(t.view.frame.title, "Primary Emotions");
        assert!(journal.load_all().unwrap().is_empty());

        // Re-entering starts over at the logging root
        let t = nav.dispatch(Event::EnterLogging);
        assert_eq!(t.view.frame.title, "Select Feeling to Log");
        assert_eq!(nav.logging_stack().map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_exit_to_browsing_while_browsing_is_noop() {
        let (mut nav, _) = controller();
        select(&mut nav, "joy");
        let before = nav.view();

        let t = nav.dispatch(Event::ExitToBrowsing);
        assert_eq!(t.notice, Notice::None);
        assert_eq!(t.view, before);
    }

    #[test]
    fn test_logging_root_matches_on_every_entry() {
        let (mut nav, _) = controller();
        let first = nav.dispatch(Event::EnterLogging).view;
        nav.dispatch(Event::BackRequested);
        let second = nav.dispatch(Event::EnterLogging).view;

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_set_starts_with_empty_root() {
        let journal = Arc::new(MemoryJournal::default());
        let nav = NavigationController::new(EmotionSet::new(), journal);

        assert!(nav.current_frame().items.is_empty());
        assert_eq!(nav.current_frame().title, "Primary Emotions");
    }

    #[test]
    fn test_full_wheel_logging_writes_journal_file() {
        let env = TestEnv::new();
        let store = env.journal();
        let data = load_embedded().unwrap();
        let mut nav = NavigationController::new(data.emotions, Arc::new(store.clone()));

        nav.dispatch(Event::EnterLogging);
        for id in ["happy", "playful", "cheeky"] {
            let emotion = nav.current_frame().item(id).cloned().unwrap();
            nav.dispatch(Event::ItemSelected(emotion));
        }

        let entries = store.load_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].emotion_id, "cheeky");
        assert_eq!(nav.mode(), Mode::Browsing);
    }
}
