//! Trade sourcing port trait.
//!
//! Upstream collaborators (CSV import, a persistence layer) supply the
//! engine with an ordered collection of trade records through this port.

use crate::domain::error::JournalError;
use crate::domain::trade::Trade;

pub trait TradeSourcePort {
    fn load_trades(&self) -> Result<Vec<Trade>, JournalError>;
}
