//! Modelos del sistema
//!
//! Estos modelos reflejan el contrato JSON de la API de transporte.
//! Los enums cerrados llevan una variante `Unknown`/`Other` para valores
//! que la API pueda mandar fuera del conjunto conocido.

pub mod auth;
pub mod dashboard;
pub mod expense;
pub mod order;
pub mod timeline;
pub mod transfer;
pub mod truck;
pub mod user;

pub use auth::{Identity, Role};
pub use order::{Order, OrderStatus};
pub use timeline::{EventType, TimelineEvent};
