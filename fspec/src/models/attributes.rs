// src/models/attributes.rs
use bitflags::bitflags;

bitflags! {
    /// File attribute bits as reported by the directory iterator.
    ///
    /// The values are the classic DOS attribute byte, so they can be copied
    /// straight from Windows file attributes and combined into search masks.
    ///
    /// ```
    /// use fspec::Attributes;
    ///
    /// let mask = Attributes::READ_ONLY | Attributes::HIDDEN;
    /// assert!(Attributes::HIDDEN.eligible(mask));
    /// assert!(!Attributes::SYSTEM.eligible(mask));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        const READ_ONLY = 0x01;
        const HIDDEN = 0x02;
        const SYSTEM = 0x04;
        /// Volume label; never produced by the bundled backends.
        const VOLUME = 0x08;
        const DIRECTORY = 0x10;
        const ARCHIVE = 0x20;
    }
}

impl Attributes {
    /// Whether an entry with these attributes is returned by a search
    /// using `mask`.
    ///
    /// Plain entries always qualify. Otherwise every bit the entry carries,
    /// apart from archive and read-only, must be requested by the mask.
    #[inline]
    #[must_use]
    pub fn eligible(self, mask: Self) -> bool {
        self.is_empty() || self.difference(mask | Self::ARCHIVE | Self::READ_ONLY).is_empty()
    }

    #[inline]
    #[must_use]
    pub const fn is_dir(self) -> bool {
        self.contains(Self::DIRECTORY)
    }

    /// Mask used when looking for subdirectories to descend into.
    #[must_use]
    pub fn subdir_mask(include_hidden: bool, include_system: bool) -> Self {
        let mut mask = Self::DIRECTORY | Self::READ_ONLY;
        mask.set(Self::HIDDEN, include_hidden);
        mask.set(Self::SYSTEM, include_system);
        mask
    }
}
