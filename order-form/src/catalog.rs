//! Band and ticket catalog.
//!
//! The catalog is read-only input supplied once per session. Costs are kept
//! in integer minor currency units (cents) so totals stay exact.

use crate::error::{OrderFormError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::path::Path;

/// Unique identifier for a band
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BandId(String);

impl BandId {
    /// Creates a band id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

}

impl fmt::Display for BandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a ticket type, unique within its band
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketTypeId(String);

impl TicketTypeId {
    /// Creates a ticket type id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

}

impl fmt::Display for TicketTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Currency amount in cents
///
/// Signed: a cost delta for lowering a quantity is negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from cents
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whether the amount is strictly greater than zero
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Adds two amounts, clamping at the `i64` bounds instead of overflowing
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiplies by a signed quantity, clamping at the `i64` bounds
    #[must_use]
    pub const fn times(self, quantity: i64) -> Self {
        Self(self.0.saturating_mul(quantity))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

// Deltas arrive in decoded actions, so arithmetic saturates rather than panics.
impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// A purchasable ticket type for one band
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketType {
    /// Ticket type id (`"type"` in the catalog data)
    #[serde(rename = "type")]
    pub id: TicketTypeId,
    /// Display name
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Unit price in cents
    pub cost: Money,
}

impl TicketType {
    /// Cost change for moving from `previous` to `new` tickets of this type
    #[must_use]
    pub fn cost_delta(&self, previous: u32, new: u32) -> Money {
        self.cost.times(i64::from(new) - i64::from(previous))
    }
}

/// A band and the tickets on sale for its show
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    /// Band id
    pub id: BandId,
    /// Band name
    pub name: String,
    /// Show date as supplied by the data source
    pub date: String,
    /// Venue
    pub location: String,
    /// Rich-text description (may contain HTML markup)
    #[serde(default)]
    pub description_blurb: String,
    /// Band image
    #[serde(rename = "imgUrl", default)]
    pub img_url: String,
    /// Tickets on sale
    #[serde(rename = "ticketTypes")]
    pub ticket_types: Vec<TicketType>,
}

impl Band {
    /// Looks up one of this band's ticket types
    #[must_use]
    pub fn ticket(&self, ticket_type: &TicketTypeId) -> Option<&TicketType> {
        self.ticket_types.iter().find(|t| &t.id == ticket_type)
    }

    /// Description as plain text
    ///
    /// Markup is dropped, common entities are decoded and one trailing
    /// period is removed. The result is text, not HTML: renderers escape it
    /// like any other user-visible string.
    #[must_use]
    pub fn description_text(&self) -> String {
        let text = decode_entities(&strip_tags(&self.description_blurb));
        let text = text.trim();
        text.strip_suffix('.').unwrap_or(text).to_string()
    }
}

fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {},
        }
    }
    text
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// All bands on sale this session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Band>", into = "Vec<Band>")]
pub struct Catalog {
    bands: Vec<Band>,
}

impl TryFrom<Vec<Band>> for Catalog {
    type Error = OrderFormError;

    fn try_from(bands: Vec<Band>) -> Result<Self> {
        Self::new(bands)
    }
}

impl From<Catalog> for Vec<Band> {
    fn from(catalog: Catalog) -> Self {
        catalog.bands
    }
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate band ids
    ///
    /// # Errors
    ///
    /// Returns [`OrderFormError::DuplicateBand`] if two bands share an id.
    pub fn new(bands: Vec<Band>) -> Result<Self> {
        let mut seen = HashSet::new();
        for band in &bands {
            if !seen.insert(&band.id) {
                return Err(OrderFormError::DuplicateBand(band.id.to_string()));
            }
        }
        Ok(Self { bands })
    }

    /// Parses a JSON array of bands
    ///
    /// # Errors
    ///
    /// Returns [`OrderFormError::CatalogParse`] for malformed data and
    /// [`OrderFormError::DuplicateBand`] for repeated ids.
    pub fn from_json(json: &str) -> Result<Self> {
        let bands: Vec<Band> = serde_json::from_str(json).map_err(OrderFormError::CatalogParse)?;
        Self::new(bands)
    }

    /// Reads and parses a catalog file
    ///
    /// # Errors
    ///
    /// Returns [`OrderFormError::CatalogIo`] if the file cannot be read,
    /// otherwise the errors of [`Catalog::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| OrderFormError::CatalogIo {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), bands = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Looks up a band
    #[must_use]
    pub fn band(&self, id: &BandId) -> Option<&Band> {
        self.bands.iter().find(|b| &b.id == id)
    }

    /// Looks up a ticket type of a band
    #[must_use]
    pub fn ticket(&self, band: &BandId, ticket_type: &TicketTypeId) -> Option<&TicketType> {
        self.band(band).and_then(|b| b.ticket(ticket_type))
    }

    /// Iterates over bands in catalog order
    pub fn bands(&self) -> impl Iterator<Item = &Band> {
        self.bands.iter()
    }

    /// Number of bands
    #[must_use]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Whether the catalog has no bands
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}
