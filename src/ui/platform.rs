use crate::ui::window_adapter::WidgetWindow;
use slint::{
    platform::{Platform, WindowAdapter},
    PlatformError,
};
use std::{
    rc::Rc,
    time::{Duration, Instant},
};

pub struct TopwatchSlintPlatform {
    window: Rc<WidgetWindow>,

    start_time: Instant,
}

impl TopwatchSlintPlatform {
    pub fn new(window: Rc<WidgetWindow>) -> Self {
        Self {
            window,
            start_time: Instant::now(),
        }
    }
}

impl Platform for TopwatchSlintPlatform {
    fn create_window_adapter(&self) -> Result<Rc<dyn WindowAdapter>, PlatformError> {
        Ok(self.window.clone())
    }

    fn duration_since_start(&self) -> Duration {
        self.start_time.elapsed()
    }
}
