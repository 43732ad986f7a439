//! Pricing Resolver
//!
//! Authoritative source for the effective unit price of a product or
//! variant. Cart-resident prices are a cache of this resolver's output;
//! the checkout reconciler re-invokes it for every payable line.

mod resolver;

pub use resolver::{PriceResolver, ResolvedPrice};
