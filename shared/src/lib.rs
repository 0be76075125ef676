//! Shared types for the PixelBox client
//!
//! Domain models, API envelope and pagination types used by both the
//! client library and the terminal application.

pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::inventory::{InventoryEntry, InventoryFilter, InventoryList, RarityStats};
pub use models::order::{
    CreateOrderRequest, CreatedOrder, Order, OrderList, OrderQuery, OrderStatus, PaymentMethod,
};
pub use models::player_show::{CreateShowRequest, PlayerShow, ShowList, ShowQuery, MAX_SHOW_CONTENT_LEN};
pub use models::series::{Item, Rarity, Series, SeriesList, SeriesQuery, SeriesSummary};
pub use models::user::{
    LoginData, LoginRequest, PointsHistory, PointsRecord, RegisterRequest, TokenData,
    UpdateProfileRequest, User, UserSummary,
};
pub use response::{ApiResponse, PageQuery, Pagination};
