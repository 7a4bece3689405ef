bitflags::bitflags! {
    /// Which screen is active.
    ///
    /// `PAUSED` and `MENU` always toggle together. Not persisted: a load
    /// always comes back as `PLAYING` alone.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SessionFlags: u8 {
        const PLAYING = 1 << 0;
        const PAUSED = 1 << 1;
        const MENU = 1 << 2;
    }
}

impl Default for SessionFlags {
    fn default() -> Self {
        Self::MENU
    }
}
