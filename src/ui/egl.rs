use std::{
    error::Error,
    ffi::{c_void, CStr},
    num::NonZeroU32,
    ptr::NonNull,
};

use glutin::{
    api::egl::{context::PossiblyCurrentContext, display::Display, surface::Surface},
    config::ConfigTemplateBuilder,
    context::ContextAttributesBuilder,
    display::GetGlDisplay,
    prelude::*,
    surface::{SurfaceAttributesBuilder, WindowSurface},
};
use raw_window_handle::{
    RawDisplayHandle, RawWindowHandle, WaylandDisplayHandle, WaylandWindowHandle,
};
use slint::platform::femtovg_renderer::OpenGLInterface;
use wayland_client::backend::ObjectId;

use crate::{common::TopwatchError, Result};

pub struct OpenGLContext {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
}

fn egl_error(what: &str, e: impl std::fmt::Display) -> TopwatchError {
    TopwatchError::Generic(format!("{what}: {e}"))
}

impl OpenGLContext {
    pub fn new(display_id: ObjectId, surface_id: ObjectId, size: (u32, u32)) -> Result<Self> {
        let display_ptr = NonNull::new(display_id.as_ptr() as *mut c_void).ok_or(
            TopwatchError::Generic("wayland display pointer is null".to_owned()),
        )?;
        let display_handle = RawDisplayHandle::Wayland(WaylandDisplayHandle::new(display_ptr));

        let config_template = ConfigTemplateBuilder::new().with_alpha_size(8).build();

        let glutin_display = unsafe { Display::new(display_handle) }
            .map_err(|e| egl_error("failed to create the EGL display", e))?;

        let config = unsafe { glutin_display.find_configs(config_template) }
            .map_err(|e| egl_error("failed to enumerate EGL configs", e))?
            .reduce(|config, acc| {
                if config.num_samples() > acc.num_samples() {
                    config
                } else {
                    acc
                }
            })
            .ok_or(TopwatchError::Generic("no EGL configs available".to_owned()))?;

        let context_attributes = ContextAttributesBuilder::new().build(None);

        let not_current = unsafe { glutin_display.create_context(&config, &context_attributes) }
            .map_err(|e| egl_error("failed to create the OpenGL context", e))?;

        let surface_ptr = NonNull::new(surface_id.as_ptr() as *mut c_void).ok_or(
            TopwatchError::Generic("wayland surface pointer is null".to_owned()),
        )?;
        let surface_handle = RawWindowHandle::Wayland(WaylandWindowHandle::new(surface_ptr));

        let (width, height) = size;

        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            surface_handle,
            NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
        );

        let surface = unsafe { glutin_display.create_window_surface(&config, &attrs) }
            .map_err(|e| egl_error("failed to create the OpenGL surface", e))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| egl_error("failed to make the OpenGL context current", e))?;

        Ok(Self { context, surface })
    }
}

unsafe impl OpenGLInterface for OpenGLContext {
    fn ensure_current(&self) -> std::result::Result<(), Box<dyn Error + Send + Sync>> {
        if !self.context.is_current() {
            self.context.make_current(&self.surface)?;
        }
        Ok(())
    }

    fn swap_buffers(&self) -> std::result::Result<(), Box<dyn Error + Send + Sync>> {
        self.surface.swap_buffers(&self.context)?;
        Ok(())
    }

    fn resize(
        &self,
        width: NonZeroU32,
        height: NonZeroU32,
    ) -> std::result::Result<(), Box<dyn Error + Send + Sync>> {
        self.ensure_current()?;
        self.surface.resize(&self.context, width, height);

        Ok(())
    }

    fn get_proc_address(&self, name: &CStr) -> *const c_void {
        self.context.display().get_proc_address(name)
    }
}
