//! Roster sources: the provider trait, the built-in squad and squad-feed
//! import.

pub mod default_squad;
pub mod provider;
pub mod squad_feed;

pub use default_squad::{default_bench, default_squad};
pub use provider::{validate_roster, RosterProvider, StaticRoster};
pub use squad_feed::{
    import_squad_feed, map_feed_position, parse_squad_feed, rating_from_market_value, transform_feed_player,
    FeedPlayer, SquadFeed,
};
