//! Controllers del portal
//!
//! Cada controller toma el cliente de la API del estado, llama a la API con el
//! token de la sesión y devuelve view models ya proyectados.

pub mod auth_controller;
pub mod dashboard_controller;
pub mod finance_controller;
pub mod order_controller;
pub mod truck_controller;
pub mod user_controller;

pub use dashboard_controller::DashboardController;
pub use finance_controller::FinanceController;
pub use order_controller::OrderController;
pub use truck_controller::TruckController;
pub use user_controller::UserController;
