/// Keyboard actions of the native window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostCommand {
    ToggleInterpolation,
    ClearTrail,
    CycleBlendMode,
    Reseed,
    Quit,
}

impl HostCommand {
    /// Map a logical key name to its command. Letters are case-insensitive.
    #[inline]
    pub fn for_key(key: &str) -> Option<HostCommand> {
        match key {
            " " | "Space" => Some(HostCommand::ToggleInterpolation),
            "c" | "C" => Some(HostCommand::ClearTrail),
            "b" | "B" => Some(HostCommand::CycleBlendMode),
            "r" | "R" => Some(HostCommand::Reseed),
            "q" | "Q" | "Escape" => Some(HostCommand::Quit),
            _ => None,
        }
    }
}
