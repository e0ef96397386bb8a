use lyon_brace::{BraceError, BraceParams, StrokeStyle};
use std::io;
use thiserror::Error;

pub struct DemoCmd {
    pub output: Box<dyn io::Write>,
    pub size: f32,
    pub fit: bool,
}

pub struct PointsCmd {
    pub params: BraceParams,
    pub output: Box<dyn io::Write>,
}

pub struct PathCmd {
    pub params: BraceParams,
    pub style: StrokeStyle,
    pub output: Box<dyn io::Write>,
}

pub struct TessellateCmd {
    pub params: BraceParams,
    pub style: StrokeStyle,
    pub output: Box<dyn io::Write>,
    pub count: bool,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Brace(#[from] BraceError),
    #[error("invalid value {value:?} for --{arg}")]
    InvalidNumber { arg: &'static str, value: String },
    #[error("expected key=value, got {0:?}")]
    InvalidStyleOption(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
