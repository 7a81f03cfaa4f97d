use chrono::Utc;
use serde::Serialize;
use tracing::info;
use validator::Validate;

use crate::client::ApiClient;
use crate::dto::truck_dto::TruckRow;
use crate::dto::ApiResponse;
use crate::models::truck::{Truck, TruckForm};
use crate::services::listing::{self, ListQuery, Page};
use crate::state::{AppState, Session};
use crate::utils::errors::AppResult;

#[derive(Debug, Serialize)]
pub struct TruckDetailView {
    pub truck: Truck,
    pub summary: TruckRow,
}

pub struct TruckController {
    api: ApiClient,
}

impl TruckController {
    pub fn new(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }

    pub async fn list(&self, session: &Session, prefix: &str, query: &ListQuery) -> AppResult<Page<TruckRow>> {
        let trucks = self.api.list_trucks(&session.access_token, query.owner).await?;
        let today = Utc::now().date_naive();
        Ok(listing::apply(trucks, query).map(|truck| TruckRow::new(&truck, prefix, today)))
    }

    pub async fn detail(&self, session: &Session, prefix: &str, id: i64) -> AppResult<TruckDetailView> {
        let truck = self.api.get_truck(&session.access_token, id).await?;
        let summary = TruckRow::new(&truck, prefix, Utc::now().date_naive());
        Ok(TruckDetailView { truck, summary })
    }

    pub async fn create(&self, session: &Session, form: TruckForm) -> AppResult<ApiResponse<Truck>> {
        form.validate()?;
        let truck = self.api.create_truck(&session.access_token, &form).await?;
        info!("🚛 Camión {} registrado", truck.truck_number);
        Ok(ApiResponse::success_with_message(truck, "Truck created successfully"))
    }

    pub async fn update(&self, session: &Session, id: i64, form: TruckForm) -> AppResult<ApiResponse<Truck>> {
        form.validate()?;
        let truck = self.api.update_truck(&session.access_token, id, &form).await?;
        Ok(ApiResponse::success_with_message(truck, "Truck updated successfully"))
    }

    pub async fn delete(&self, session: &Session, id: i64) -> AppResult<ApiResponse<()>> {
        self.api.delete_truck(&session.access_token, id).await?;
        Ok(ApiResponse::message("Truck deleted successfully"))
    }

    pub async fn assign_driver(
        &self,
        session: &Session,
        id: i64,
        driver_id: i64,
    ) -> AppResult<ApiResponse<serde_json::Value>> {
        let result = self
            .api
            .assign_driver(&session.access_token, id, driver_id)
            .await?;
        info!("👷 Conductor {} asignado al camión {}", driver_id, id);
        Ok(ApiResponse::success_with_message(result, "Driver assigned successfully"))
    }
}
