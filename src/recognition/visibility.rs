//! Level-triggered UI visibility rules.
//!
//! Recomputed every tick from the current panel flags and tracking state
//! rather than driven by edges, so the rules stay pure and testable without
//! a frame loop.

/// Active flags of the fixed set of menu panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuPanels {
    pub main: bool,
    pub settings: bool,
    pub about: bool,
}

impl MenuPanels {
    pub fn any_open(&self) -> bool {
        self.main || self.settings || self.about
    }
}

/// Which of the three mutually suppressing conditions currently wins.
/// Precedence: an open menu over active tracking over idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    MenuOpen,
    Tracking,
    Idle,
}

/// Computed visibility of the tracking subsystem and UI elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// Tracking must not run while a menu obscures the camera view.
    pub tracker_active: bool,
    /// Idle/home panel, shown only when nothing else claims the screen.
    pub idle_panel_visible: bool,
    /// Home-navigation control, shown while a target is tracked.
    pub home_nav_visible: bool,
}

impl ViewState {
    /// Pure per-tick recomputation from current state.
    pub fn compute(menu_open: bool, is_tracking: bool) -> Self {
        Self {
            tracker_active: !menu_open,
            idle_panel_visible: !is_tracking && !menu_open,
            home_nav_visible: is_tracking,
        }
    }

    pub fn phase(menu_open: bool, is_tracking: bool) -> ViewPhase {
        if menu_open {
            ViewPhase::MenuOpen
        } else if is_tracking {
            ViewPhase::Tracking
        } else {
            ViewPhase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_state() {
        let view = ViewState::compute(false, false);
        assert!(view.tracker_active);
        assert!(view.idle_panel_visible);
        assert!(!view.home_nav_visible);
        assert_eq!(ViewState::phase(false, false), ViewPhase::Idle);
    }

    #[test]
    fn test_menu_suppresses_tracker() {
        let view = ViewState::compute(true, false);
        assert!(!view.tracker_active);
        assert!(!view.idle_panel_visible);
        assert!(!view.home_nav_visible);
    }

    #[test]
    fn test_tracking_suppresses_idle_panel() {
        let view = ViewState::compute(false, true);
        assert!(view.tracker_active);
        assert!(!view.idle_panel_visible);
        assert!(view.home_nav_visible);
    }

    #[test]
    fn test_menu_wins_over_tracking() {
        // Tracking flag can lag behind menu opening until the lost event
        // arrives; the menu still wins.
        let view = ViewState::compute(true, true);
        assert!(!view.tracker_active);
        assert!(!view.idle_panel_visible);
        assert!(view.home_nav_visible);
        assert_eq!(ViewState::phase(true, true), ViewPhase::MenuOpen);
    }

    #[test]
    fn test_any_open() {
        assert!(!MenuPanels::default().any_open());
        let panels = MenuPanels {
            settings: true,
            ..Default::default()
        };
        assert!(panels.any_open());
    }
}
