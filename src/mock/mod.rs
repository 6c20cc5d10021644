mod script;

pub use script::{ScriptError, ScriptedMove, ScriptedPlayer};
