//! Ticket-selection ledger: per band, per ticket type quantities.

use crate::catalog::{BandId, Catalog, Money, TicketTypeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Quantities chosen for one band, keyed by ticket type
pub type BandSelection = BTreeMap<TicketTypeId, u32>;

/// Ticket quantities for every band in the session
///
/// The running total lives next to the ledger in the order state and is
/// maintained incrementally by the reducer; [`TicketSelections::priced_total`]
/// recomputes it from scratch for verification only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketSelections(BTreeMap<BandId, BandSelection>);

impl TicketSelections {
    /// Creates an empty ledger
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Zero quantity for every band and ticket type in `catalog`
    #[must_use]
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self(
            catalog
                .bands()
                .map(|band| {
                    let tickets = band
                        .ticket_types
                        .iter()
                        .map(|ticket| (ticket.id.clone(), 0))
                        .collect();
                    (band.id.clone(), tickets)
                })
                .collect(),
        )
    }

    /// Sets one entry and returns the quantity it replaced
    ///
    /// An entry that did not exist counts as zero. No other entry is
    /// touched.
    pub fn set_quantity(&mut self, band: &BandId, ticket_type: &TicketTypeId, quantity: u32) -> u32 {
        self.0
            .entry(band.clone())
            .or_default()
            .insert(ticket_type.clone(), quantity)
            .unwrap_or(0)
    }

    /// Quantity selected for one ticket type, zero if absent
    #[must_use]
    pub fn quantity(&self, band: &BandId, ticket_type: &TicketTypeId) -> u32 {
        self.0
            .get(band)
            .and_then(|tickets| tickets.get(ticket_type))
            .copied()
            .unwrap_or(0)
    }

    /// Selection for one band
    #[must_use]
    pub fn band(&self, band: &BandId) -> Option<&BandSelection> {
        self.0.get(band)
    }

    /// Total number of tickets across all bands
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.0
            .values()
            .flat_map(BTreeMap::values)
            .map(|&q| u64::from(q))
            .sum()
    }

    /// Σ quantity × unit price, priced against `catalog`
    ///
    /// Entries the catalog does not know are priced at zero.
    #[must_use]
    pub fn priced_total(&self, catalog: &Catalog) -> Money {
        self.iter()
            .map(|(band, ticket_type, quantity)| {
                catalog
                    .ticket(band, ticket_type)
                    .map_or(Money::ZERO, |t| t.cost.times(i64::from(quantity)))
            })
            .sum()
    }

    /// Every `(band, ticket type, quantity)` entry
    pub fn iter(&self) -> impl Iterator<Item = (&BandId, &TicketTypeId, u32)> {
        self.0.iter().flat_map(|(band, tickets)| {
            tickets
                .iter()
                .map(move |(ticket_type, &quantity)| (band, ticket_type, quantity))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;

    #[test]
    fn for_catalog_zeroes_every_pair() {
        let catalog = fixtures::catalog();
        let ledger = TicketSelections::for_catalog(&catalog);

        let mut pairs = 0;
        for band in catalog.bands() {
            for ticket in &band.ticket_types {
                assert_eq!(ledger.band(&band.id).and_then(|b| b.get(&ticket.id)), Some(&0));
                pairs += 1;
            }
        }
        assert_eq!(ledger.iter().count(), pairs);
        assert_eq!(ledger.total_quantity(), 0);
    }

    #[test]
    fn set_quantity_changes_only_one_entry() {
        let catalog = fixtures::catalog();
        let mut ledger = TicketSelections::for_catalog(&catalog);
        let before = ledger.clone();
        let skalar = BandId::new("skalar");
        let vip = TicketTypeId::new("vip");

        let previous = ledger.set_quantity(&skalar, &vip, 3);

        assert_eq!(previous, 0);
        assert_eq!(ledger.quantity(&skalar, &vip), 3);
        let kpop = BandId::new("kpop-stars");
        assert_eq!(ledger.band(&kpop), before.band(&kpop));
        assert_eq!(
            ledger.quantity(&skalar, &TicketTypeId::new("general")),
            before.quantity(&skalar, &TicketTypeId::new("general"))
        );
    }

    #[test]
    fn absent_entries_read_as_zero_and_can_be_created() {
        let mut ledger = TicketSelections::new();
        let band = BandId::new("unknown");
        let ticket = TicketTypeId::new("ghost");

        assert_eq!(ledger.quantity(&band, &ticket), 0);
        assert_eq!(ledger.set_quantity(&band, &ticket, 2), 0);
        assert_eq!(ledger.set_quantity(&band, &ticket, 5), 2);
        assert_eq!(ledger.total_quantity(), 5);
    }

    #[test]
    fn priced_total_uses_catalog_prices() {
        let catalog = fixtures::catalog();
        let mut ledger = TicketSelections::for_catalog(&catalog);
        ledger.set_quantity(&BandId::new("skalar"), &TicketTypeId::new("general"), 2);
        ledger.set_quantity(&BandId::new("kpop-stars"), &TicketTypeId::new("floor"), 1);
        ledger.set_quantity(&BandId::new("nobody"), &TicketTypeId::new("free"), 9);

        assert_eq!(ledger.priced_total(&catalog), Money::from_cents(2 * 1500 + 8000));
    }
}
