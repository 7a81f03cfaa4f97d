use tracing::warn;

use crate::client::ApiClient;
use crate::dto::dashboard_dto::{AdminDashboard, DriverDashboard, OwnerDashboard};
use crate::models::dashboard::DashboardStats;
use crate::services::dashboard::{admin_dashboard, driver_dashboard, owner_dashboard};
use crate::state::{AppState, Session};
use crate::utils::errors::{AppError, AppResult};

pub struct DashboardController {
    api: ApiClient,
}

impl DashboardController {
    pub fn new(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }

    /// Las estadísticas son opcionales: si fallan se pinta el dashboard con ceros.
    /// Un 401 sí se propaga para cerrar la sesión.
    async fn stats_or_default(&self, token: &str) -> AppResult<DashboardStats> {
        match self.api.dashboard_stats(token).await {
            Ok(stats) => Ok(stats),
            Err(AppError::Unauthorized(message)) => Err(AppError::Unauthorized(message)),
            Err(e) => {
                warn!("⚠️ Estadísticas no disponibles: {}", e);
                Ok(DashboardStats::default())
            }
        }
    }

    pub async fn admin(&self, session: &Session) -> AppResult<AdminDashboard> {
        let token = session.access_token.as_str();
        let (users, trucks, stats) = futures::try_join!(
            self.api.list_users(token),
            self.api.list_trucks(token, None),
            self.stats_or_default(token),
        )?;
        Ok(admin_dashboard(&users, &trucks, &stats))
    }

    pub async fn owner(&self, session: &Session) -> AppResult<OwnerDashboard> {
        let token = session.access_token.as_str();
        let (trucks, orders, stats) = futures::try_join!(
            self.api.list_trucks(token, None),
            self.api.list_orders(token),
            self.stats_or_default(token),
        )?;
        Ok(owner_dashboard(&trucks, &orders, &stats))
    }

    pub async fn driver(&self, session: &Session) -> AppResult<DriverDashboard> {
        let token = session.access_token.as_str();
        let (orders, expenses, stats) = futures::try_join!(
            self.api.list_orders(token),
            self.api.list_expenses(token, None),
            self.stats_or_default(token),
        )?;
        Ok(driver_dashboard(&orders, &expenses, &stats))
    }
}
