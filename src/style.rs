use futures_lite::future::block_on;
use slint_interpreter::{Compiler, ComponentDefinition};
use std::path::PathBuf;

use crate::{
    common::TopwatchError,
    ui::slint_types::{self, SlintProperty},
    Result,
};

pub(crate) const FALLBACK_STYLE: &str = include_str!("../docs/fallback_style.slint");

/// Load the user style from the XDG config directories, falling back to the
/// built-in one when it is missing or does not satisfy the contract.
pub fn load_style_or_fallback() -> Result<ComponentDefinition> {
    let style = get_style_and_include_paths()
        .and_then(|(style_string, config_dirs)| load_style(style_string, config_dirs, false));
    if let Err(e) = style {
        log::warn!("Loading the topwatch style failed. Loading the built-in style. Errors:\n{e}");
        load_style(FALLBACK_STYLE.to_owned(), vec![], true)
    } else {
        style
    }
}

fn get_style_and_include_paths() -> Result<(String, Vec<PathBuf>)> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("topwatch");

    let theme_path = xdg_dirs
        .find_config_file("style.slint")
        .ok_or(TopwatchError::Generic(
            "Could not find style.slint in config paths".to_owned(),
        ))?;

    let style =
        std::fs::read_to_string(theme_path).map_err(|e| TopwatchError::Generic(e.to_string()))?;

    let mut config_dirs = xdg_dirs.get_config_dirs();
    config_dirs.push(xdg_dirs.get_config_home().ok_or(TopwatchError::Generic(
        "Failed to get XDG directories".to_owned(),
    ))?);
    Ok((style, config_dirs))
}

/// Compile a slint style from a string and check the property contract.
fn load_style(
    style: String,
    include_paths: Vec<PathBuf>,
    supress_warnings: bool,
) -> Result<ComponentDefinition> {
    let mut compiler = Compiler::default();
    compiler.set_include_paths(include_paths);

    let result = block_on(compiler.build_from_source(style, Default::default()));
    result.print_diagnostics();
    let definition = result.component(result.component_names().next().unwrap_or_default());
    let definition = definition.ok_or(TopwatchError::Generic(
        "Compiling the slint code failed".to_owned(),
    ))?;

    let existing: Vec<_> = definition.properties().map(SlintProperty::from).collect();
    slint_types::check_properties(&slint_types::required_properties(), &existing)?;
    if let Err(TopwatchError::MissingProperties(properties)) =
        slint_types::check_properties(&slint_types::optional_properties(), &existing)
    {
        if !supress_warnings {
            log::info!("The following optional properties are not set: {properties:?}");
        }
    }

    Ok(definition)
}

#[cfg(test)]
mod tests {
    use crate::Result;

    use super::{load_style, FALLBACK_STYLE};

    #[test]
    fn fallback_style_satisfies_the_contract() -> Result<()> {
        load_style(FALLBACK_STYLE.to_owned(), vec![], true)?;
        Ok(())
    }
}
