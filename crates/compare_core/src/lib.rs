//! Price-compare core: price parsing, payload normalization, best-deal
//! selection and the pure search state machine.
mod best_deal;
mod effect;
mod error;
mod msg;
mod normalize;
mod platform;
mod price;
mod result;
mod state;
mod update;
mod view_model;

pub use best_deal::{select_best, BestDeal, PriceComparison};
pub use effect::Effect;
pub use error::ValidationError;
pub use msg::Msg;
pub use normalize::{echoed_product_name, normalize, PayloadShape};
pub use platform::{Platform, UnknownPlatform};
pub use price::{parse_price, ParsedPrice, NOT_AVAILABLE};
pub use result::{CanonicalResult, TaskStatus};
pub use state::{
    AppState, FailureCause, Generation, Phase, SearchFailure, DEFAULT_SEARCH_TIMEOUT_SECS,
};
pub use update::update;
pub use view_model::{AppViewModel, PlatformRowView};
