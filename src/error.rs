use crate::{config::ConfigError, loader::LoaderError, prompt::PromptError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid simulation configuration")]
    Config(#[from] ConfigError),
    #[error("failed to load the obstacle image")]
    Loader(#[from] LoaderError),
    #[error("interactive prompt failed")]
    Prompt(#[from] PromptError),
}

/// Writes the error and its chain of causes
pub fn error_chain(e: &impl std::error::Error) -> String {
    let mut msg = e.to_string();
    let mut current = e.source();
    while let Some(cause) = current {
        msg.push_str(&format!("\n  caused by: {}", cause));
        current = cause.source();
    }
    msg
}
