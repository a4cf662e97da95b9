use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Missing setting: {name} (set it with a flag or the environment)")]
    MissingSetting { name: String },
}
