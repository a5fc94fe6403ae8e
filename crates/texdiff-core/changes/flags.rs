//! Category flags attached to every change and rendered span
//!
//! The flag vocabulary is shared with callers that filter the rendered
//! history (hide comments, hide typo fixes, ...). Flags never take part in
//! the ordering of changes.

bitflags::bitflags! {
    /// Categories a change or a sub-span belongs to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ChangeFlags: u8 {
        /// Change lies before the preamble boundary
        const PREAMBLE = 1 << 0;
        /// Change is a comment or lies inside one
        const COMMENT = 1 << 1;
        /// Change is a markup command
        const COMMAND = 1 << 2;
        /// Change removes text
        const DELETION = 1 << 3;
        /// Change was found by the character-level pass
        const SMALL = 1 << 4;
    }
}

impl ChangeFlags {
    /// Lower-case names of the individual flags, in bit order
    pub const NAMES: [(&'static str, Self); 5] = [
        ("preamble", Self::PREAMBLE),
        ("comment", Self::COMMENT),
        ("command", Self::COMMAND),
        ("deletion", Self::DELETION),
        ("small", Self::SMALL),
    ];

    /// Look up a single flag by its case-insensitive name
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(label.trim()))
            .map(|&(_, flag)| flag)
    }

    /// Lower-case names of the flags contained in this set
    #[must_use]
    pub fn labels(self) -> Vec<&'static str> {
        Self::NAMES
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|&(name, _)| name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        assert_eq!(ChangeFlags::from_label("Small"), Some(ChangeFlags::SMALL));
        assert_eq!(ChangeFlags::from_label(" comment "), Some(ChangeFlags::COMMENT));
        assert_eq!(ChangeFlags::from_label("bold"), None);

        let set = ChangeFlags::COMMAND | ChangeFlags::DELETION;
        assert_eq!(set.labels(), vec!["command", "deletion"]);
        assert!(ChangeFlags::empty().labels().is_empty());
    }

    #[test]
    fn flag_set_operations() {
        let hide = ChangeFlags::COMMENT | ChangeFlags::SMALL;
        assert!(hide.intersects(ChangeFlags::SMALL | ChangeFlags::DELETION));
        assert!(!hide.intersects(ChangeFlags::PREAMBLE));
        assert_eq!(ChangeFlags::default(), ChangeFlags::empty());
    }
}
