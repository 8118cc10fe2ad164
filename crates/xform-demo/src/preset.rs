use std::fmt;

use xform_engine::input::Key;

/// One of the four fixed transforms.
///
/// Each preset is a full matrix replacement; nothing composes with the
/// previous transform.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum Preset {
    Reset,
    KeySolution,
    MySolution,
    CenterScale,
}

/// Matrices in row-major display order.
const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

const KEY_SOLUTION: [f32; 16] = [
    2.0, 0.0, 0.0, 0.0,
    0.0, 3.0, 0.0, 8.0,
    0.0, 0.0, 5.0, 4.0,
    0.0, 0.0, 0.0, 1.0,
];

const MY_SOLUTION: [f32; 16] = [
    2.0, 0.0, 0.0, 0.0,
    0.0, 3.0, 0.0, -8.0,
    0.0, 0.0, 5.0, -4.0,
    0.0, 0.0, 0.0, 1.0,
];

const CENTER_SCALE: [f32; 16] = [
    2.0, 0.0, 0.0, 0.0,
    0.0, 3.0, 0.0, 0.0,
    0.0, 0.0, 5.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

impl Preset {
    /// Button order, left to right.
    pub const ALL: [Preset; 4] = [
        Preset::Reset,
        Preset::KeySolution,
        Preset::MySolution,
        Preset::CenterScale,
    ];

    pub fn matrix(self) -> [f32; 16] {
        match self {
            Preset::Reset => IDENTITY,
            Preset::KeySolution => KEY_SOLUTION,
            Preset::MySolution => MY_SOLUTION,
            Preset::CenterScale => CENTER_SCALE,
        }
    }

    /// Position in [`Preset::ALL`].
    pub fn index(self) -> usize {
        match self {
            Preset::Reset => 0,
            Preset::KeySolution => 1,
            Preset::MySolution => 2,
            Preset::CenterScale => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::Reset => "reset",
            Preset::KeySolution => "key solution",
            Preset::MySolution => "my solution",
            Preset::CenterScale => "center scale",
        }
    }

    /// Keyboard shortcuts: initial letter or button number.
    pub fn shortcuts(self) -> [char; 2] {
        match self {
            Preset::Reset => ['r', '1'],
            Preset::KeySolution => ['k', '2'],
            Preset::MySolution => ['m', '3'],
            Preset::CenterScale => ['c', '4'],
        }
    }

    pub fn from_key(key: Key) -> Option<Preset> {
        let Key::Char(c) = key else { return None };
        Preset::ALL.into_iter().find(|p| p.shortcuts().contains(&c))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_button_order() {
        for (i, p) in Preset::ALL.into_iter().enumerate() {
            assert_eq!(p.index(), i);
        }
    }

    #[test]
    fn shortcuts_select_presets() {
        assert_eq!(Preset::from_key(Key::Char('k')), Some(Preset::KeySolution));
        assert_eq!(Preset::from_key(Key::Char('3')), Some(Preset::MySolution));
        assert_eq!(Preset::from_key(Key::Char('c')), Some(Preset::CenterScale));
        assert_eq!(Preset::from_key(Key::Char('1')), Some(Preset::Reset));
        assert_eq!(Preset::from_key(Key::Char('x')), None);
        assert_eq!(Preset::from_key(Key::Escape), None);
    }

    #[test]
    fn solutions_differ_only_in_translation() {
        let key = Preset::KeySolution.matrix();
        let mine = Preset::MySolution.matrix();
        let center = Preset::CenterScale.matrix();
        for i in [0, 5, 10, 15] {
            assert_eq!(key[i], center[i]);
            assert_eq!(mine[i], center[i]);
        }
        assert_eq!((key[7], key[11]), (8.0, 4.0));
        assert_eq!((mine[7], mine[11]), (-8.0, -4.0));
        assert_eq!((center[7], center[11]), (0.0, 0.0));
    }
}
