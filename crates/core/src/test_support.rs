// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::token::Token;

/// A fixed, obviously-synthetic token for tests that need a stable one.
pub fn fixed_token() -> Token {
    Token::parse("0123456789abcdefghijklmnopqrstuv").unwrap_or_else(|_| Token::generate())
}

/// Settings text for a drill scrape with the given paging shape.
pub fn drill_settings_toml(pages: u32, page_delay_ms: u64) -> String {
    format!(
        "forum = \"drill\"\nbase_url = \"https://forum.example.org\"\n\n\
         [driver]\npages = {pages}\npage_delay_ms = {page_delay_ms}\n"
    )
}

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for protocol types.
pub mod strategies {
    use crate::token::Token;
    use proptest::prelude::*;

    pub fn arb_token() -> impl Strategy<Value = Token> {
        "[0-9a-z]{32}".prop_map(|s| {
            Token::parse(&s).unwrap_or_else(|_| Token::generate())
        })
    }
}
