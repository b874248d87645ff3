pub mod account;
pub mod biodata;
pub mod favourite;
pub mod payment;
pub mod success_story;

pub use account::{AccountRow, Role};
pub use biodata::{BiodataRow, VisibilityStatus};
pub use favourite::FavouriteRow;
pub use payment::{PaymentRow, PaymentStatus};
pub use success_story::SuccessStoryRow;
