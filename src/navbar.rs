//! Show/hide navbar.
//!
//! The navbar starts absolutely positioned over the hero and scrolls away with it.
//! Once the hero is gone it turns sticky and hidden, and from then on reappears when
//! the user scrolls up and hides again on the way down. Direction is taken from the
//! scroll-offset delta against the last offset that moved by at least `jitter`, so
//! a slow scroll of many small frames still adds up.

use crate::config::NavbarConfig;

pub const CLASS_TOP: &str = "navbar-top";
pub const CLASS_FIXED: &str = "navbar-fixed";
pub const CLASS_HIDDEN: &str = "navbar-hidden";

/// Travel accumulated in the current direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    Idle,
    AccumulatingUp(f64),
    AccumulatingDown(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavbarClasses {
    pub top: bool,
    pub fixed: bool,
    pub hidden: bool,
}

impl NavbarClasses {
    /// `(class, present)` pairs, for applying to a class list.
    pub fn toggles(&self) -> [(&'static str, bool); 3] {
        [
            (CLASS_TOP, self.top),
            (CLASS_FIXED, self.fixed),
            (CLASS_HIDDEN, self.hidden),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavbarUpdate {
    pub classes: NavbarClasses,
    /// The navbar jumped between static and sticky: CSS transitions must be off for
    /// this frame so it does not animate across the page.
    pub suppress_transition: bool,
}

#[derive(Debug)]
pub struct Navbar {
    config: NavbarConfig,
    sticky: bool,
    /// Last offset whose delta passed the jitter filter.
    last_offset: f64,
    direction: Direction,
    classes: NavbarClasses,
}

impl Navbar {
    pub fn new(config: NavbarConfig, initial_offset: f64) -> Self {
        Self {
            config,
            sticky: false,
            last_offset: initial_offset,
            direction: Direction::Idle,
            classes: NavbarClasses {
                top: initial_offset < config.top_offset,
                ..NavbarClasses::default()
            },
        }
    }

    pub fn classes(&self) -> NavbarClasses {
        self.classes
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    /// `hero_height` is the offset at which the navbar turns sticky.
    pub fn update(&mut self, offset: f64, hero_height: f64) -> NavbarUpdate {
        let delta = offset - self.last_offset;
        if delta.abs() >= self.config.jitter {
            self.last_offset = offset;
            self.accumulate(delta);
        }

        self.classes.top = offset < self.config.top_offset;
        let mut suppress_transition = false;

        if offset <= self.config.reset_offset {
            if self.sticky {
                self.sticky = false;
                self.classes.fixed = false;
                self.classes.hidden = false;
                suppress_transition = true;
            }
            return self.emit(suppress_transition);
        }

        if !self.sticky {
            if offset < hero_height {
                return self.emit(false);
            }
            self.sticky = true;
            self.classes.fixed = true;
            self.classes.hidden = true;
            suppress_transition = true;
        }

        let threshold = self.config.direction_threshold;
        match self.direction {
            Direction::AccumulatingUp(travel) if travel > threshold => {
                self.classes.hidden = false;
            }
            Direction::AccumulatingDown(travel)
                if travel > threshold && offset > self.config.top_offset =>
            {
                self.classes.hidden = true;
            }
            _ => {}
        }
        self.emit(suppress_transition)
    }

    fn accumulate(&mut self, delta: f64) {
        self.direction = match (self.direction, delta > 0.0) {
            (Direction::AccumulatingDown(travel), true) => Direction::AccumulatingDown(travel + delta),
            (_, true) => Direction::AccumulatingDown(delta),
            (Direction::AccumulatingUp(travel), false) => Direction::AccumulatingUp(travel - delta),
            (_, false) => Direction::AccumulatingUp(-delta),
        };
    }

    fn emit(&self, suppress_transition: bool) -> NavbarUpdate {
        NavbarUpdate {
            classes: self.classes,
            suppress_transition,
        }
    }
}
