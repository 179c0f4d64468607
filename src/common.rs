use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum TopwatchError {
    #[error("{0}")]
    Generic(String),
    #[error("could not connect to the wayland compositor: {0}")]
    Connect(#[from] wayland_client::ConnectError),
    #[error("wayland error: {0}")]
    Global(#[from] wayland_client::globals::GlobalError),
    #[error("wayland dispatch failed: {0}")]
    Dispatch(#[from] wayland_client::DispatchError),
    #[error("the compositor does not provide the '{0}' global")]
    MissingGlobal(&'static str),
    #[error("Failed to get or set the '{0}' slint property.\
The topwatch style component needs to have a '{0}' property \
of the documented type.")]
    PropertyFail(String),
    #[error("The following properties are missing:\n {0:?} \nCheck if they exist and have the correct type")]
    MissingProperties(Vec<String>),
    #[error("autostart registration failed: {0}")]
    Autostart(String),
    #[error("the windowing thread quit before the surface was ready")]
    WindowingThreadQuit,
}

impl TopwatchError {
    pub fn property_fail(name: &str) -> Self {
        Self::PropertyFail(name.to_owned())
    }
}
