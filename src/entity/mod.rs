pub mod events;
pub mod order_items;
pub mod orders;
pub mod products;
pub mod sample_requests;

pub use events::Entity as Events;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use sample_requests::Entity as SampleRequests;
