////////////////////////////////////////////////////////////////////////////////
// Mathprose combinator kernel
////////////////////////////////////////////////////////////////////////////////
// Copyright 2022 Skylor R. Schermer
// This code is dual licenced using the MIT or Apache 2 license.
// See licence-mit.md and licence-apache.md for details.
////////////////////////////////////////////////////////////////////////////////
//! Human-readable diagnostic reporting.
//!
//! Stands in for the distilled source's separate message/reporting module:
//! diagnostics emitted here (synonym-registry validation failures) are not
//! [`ParseResult`](crate::result::ParseResult) errors and never affect
//! parser state.
////////////////////////////////////////////////////////////////////////////////

use colored::Color;
use colored::Colorize as _;


////////////////////////////////////////////////////////////////////////////////
// MessageType
////////////////////////////////////////////////////////////////////////////////
/// The severity of a diagnostic message, used to pick its display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// An informational message.
    Info,
    /// A message about a condition that prevented an operation.
    Warning,
    /// A message about a definite error.
    Error,
    /// A supplementary remark attached to another message.
    Note,
    /// A suggestion for how to resolve a reported condition.
    Help,
}

impl MessageType {
    /// Returns the color associated with the message type.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            MessageType::Info    => Color::BrightBlue,
            MessageType::Warning => Color::BrightYellow,
            MessageType::Error   => Color::BrightRed,
            MessageType::Note    => Color::BrightBlue,
            MessageType::Help    => Color::BrightGreen,
        }
    }

    fn label(self) -> &'static str {
        match self {
            MessageType::Info    => "info",
            MessageType::Warning => "warning",
            MessageType::Error   => "error",
            MessageType::Note    => "note",
            MessageType::Help    => "help",
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label().color(self.color()).bold())
    }
}


////////////////////////////////////////////////////////////////////////////////
// emit
////////////////////////////////////////////////////////////////////////////////
/// Emits a diagnostic to stderr and, when the `trace` feature is enabled, to
/// the tracing subscriber.
pub fn emit(kind: MessageType, text: impl std::fmt::Display) {
    #[cfg(feature = "trace")]
    {
        match kind {
            MessageType::Info    => tracing::info!("{text}"),
            MessageType::Warning => tracing::warn!("{text}"),
            MessageType::Error   => tracing::error!("{text}"),
            MessageType::Note    => tracing::info!("{text}"),
            MessageType::Help    => tracing::info!("{text}"),
        }
    }
    eprintln!("{kind}: {text}");
}
