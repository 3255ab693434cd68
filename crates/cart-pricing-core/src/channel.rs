//! # Channels and Price Field Keys
//!
//! Maps the traffic-source attribution on a cart to the metadata keys that
//! hold that channel's prices.
//!
//! ## Key Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  utm_source      Channel              base key            tier key      │
//! │  ──────────      ───────              ────────            ────────      │
//! │  "direct"    ──► Direct          ──►  base_price          tiered_price  │
//! │  ""/missing  ──► (default)       ──►  (as configured)                   │
//! │  "Google"    ──► Named("google") ──►  base_price_google   tiered_price_ │
//! │                                                           google        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

/// Attribution value that selects the unqualified price fields.
pub const DIRECT: &str = "direct";

/// A normalised traffic-source channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Channel {
    /// Unattributed traffic. Uses the unqualified field names.
    #[default]
    Direct,
    /// Any other source, lower-cased and trimmed.
    Named(String),
}

impl Channel {
    /// Normalises a raw attribution value.
    ///
    /// ## Example
    /// ```rust
    /// use cart_pricing_core::channel::Channel;
    ///
    /// assert_eq!(Channel::parse(" Google "), Channel::Named("google".into()));
    /// assert_eq!(Channel::parse("DIRECT"), Channel::Direct);
    /// assert_eq!(Channel::parse(""), Channel::Direct);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let normalised = raw.trim().to_lowercase();
        if normalised.is_empty() || normalised == DIRECT {
            Channel::Direct
        } else {
            Channel::Named(normalised)
        }
    }

    /// Picks the channel from the cart attribute, or `default` when the cart
    /// carries no usable value.
    pub fn from_attribute(value: Option<&str>, default: &Channel) -> Self {
        match value.map(str::trim) {
            Some(raw) if !raw.is_empty() => Channel::parse(raw),
            _ => default.clone(),
        }
    }

    /// Returns true for the unqualified channel.
    #[inline]
    pub fn is_direct(&self) -> bool {
        matches!(self, Channel::Direct)
    }

    /// Channel name as it appears in logs and field suffixes.
    pub fn as_str(&self) -> &str {
        match self {
            Channel::Direct => DIRECT,
            Channel::Named(name) => name,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Price Fields
// =============================================================================

/// The two kinds of pricing metadata a product or variant carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    /// Flat unit price in minor units.
    Base,
    /// Quantity-break table: minimum quantity → unit price.
    Tiered,
}

impl PriceField {
    /// Field name used for direct traffic and as the last-resort fallback.
    pub const fn unqualified(self) -> &'static str {
        match self {
            PriceField::Base => "base_price",
            PriceField::Tiered => "tiered_price",
        }
    }

    /// Field name for the given channel.
    ///
    /// ## Example
    /// ```rust
    /// use cart_pricing_core::channel::{Channel, PriceField};
    ///
    /// assert_eq!(PriceField::Base.key(&Channel::Direct), "base_price");
    /// assert_eq!(
    ///     PriceField::Tiered.key(&Channel::parse("idealo")),
    ///     "tiered_price_idealo"
    /// );
    /// ```
    pub fn key(self, channel: &Channel) -> String {
        match channel {
            Channel::Direct => self.unqualified().to_string(),
            Channel::Named(name) => format!("{}_{}", self.unqualified(), name),
        }
    }
}
