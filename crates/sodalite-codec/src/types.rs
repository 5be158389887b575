// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Base64 alphabet and padding selection (RFC 4648).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Base64Variant {
    /// Standard alphabet (`+`, `/`) with `=` padding.
    Original,
    /// Standard alphabet without padding.
    OriginalNoPadding,
    /// URL-safe alphabet (`-`, `_`) with `=` padding.
    UrlSafe,
    /// URL-safe alphabet without padding.
    UrlSafeNoPadding,
}

impl Base64Variant {
    /// All variants, in libsodium's numbering order (1, 3, 5, 7).
    pub const ALL: [Base64Variant; 4] = [
        Base64Variant::Original,
        Base64Variant::OriginalNoPadding,
        Base64Variant::UrlSafe,
        Base64Variant::UrlSafeNoPadding,
    ];

    /// Whether encoded output is padded with `=` to a multiple of 4 characters.
    #[inline(always)]
    pub const fn is_padded(self) -> bool {
        matches!(self, Base64Variant::Original | Base64Variant::UrlSafe)
    }

    /// Whether the URL-safe alphabet is used.
    #[inline(always)]
    pub const fn is_url_safe(self) -> bool {
        matches!(self, Base64Variant::UrlSafe | Base64Variant::UrlSafeNoPadding)
    }
}

/// Outcome of a successful decode.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Decoded {
    /// Bytes written to the output buffer.
    pub len: usize,
    /// Input bytes consumed, ignored separators and padding included.
    pub consumed: usize,
}
