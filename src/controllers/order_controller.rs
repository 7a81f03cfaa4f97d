use tracing::info;
use validator::Validate;

use crate::client::ApiClient;
use crate::dto::order_dto::{OrderDetailView, OrderRow};
use crate::dto::ApiResponse;
use crate::models::order::{Order, OrderForm, UpdateStatusRequest};
use crate::services::listing::{self, ListQuery, Page};
use crate::state::{AppState, Session};
use crate::utils::errors::AppResult;

pub struct OrderController {
    api: ApiClient,
}

impl OrderController {
    pub fn new(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }

    /// Listado filtrado; la API ya limita las órdenes al alcance del rol
    pub async fn list(&self, session: &Session, prefix: &str, query: &ListQuery) -> AppResult<Page<OrderRow>> {
        let orders = self.api.list_orders(&session.access_token).await?;
        Ok(listing::apply(orders, query).map(|order| OrderRow::new(&order, prefix)))
    }

    /// Ficha completa: la orden primero, el resto en paralelo
    pub async fn detail(&self, session: &Session, id: i64) -> AppResult<OrderDetailView> {
        let token = session.access_token.as_str();
        let order = self.api.get_order(token, id).await?;

        let (expenses, transfers, timeline) = futures::try_join!(
            self.api.order_expenses(token, id),
            self.api.order_transfers(token, id),
            self.api.order_timeline(token, id),
        )?;

        Ok(OrderDetailView::build(order, &expenses, &transfers, &timeline))
    }

    pub async fn create(&self, session: &Session, form: OrderForm) -> AppResult<ApiResponse<Order>> {
        form.validate()?;
        let order = self.api.create_order(&session.access_token, &form).await?;
        info!("📦 Orden {} creada por {}", order.order_number, session.identity.email);
        Ok(ApiResponse::success_with_message(order, "Order created successfully"))
    }

    pub async fn update(&self, session: &Session, id: i64, form: OrderForm) -> AppResult<ApiResponse<Order>> {
        form.validate()?;
        let order = self.api.update_order(&session.access_token, id, &form).await?;
        Ok(ApiResponse::success_with_message(order, "Order updated successfully"))
    }

    pub async fn delete(&self, session: &Session, id: i64) -> AppResult<ApiResponse<()>> {
        self.api.delete_order(&session.access_token, id).await?;
        info!("🗑️ Orden {} eliminada por {}", id, session.identity.email);
        Ok(ApiResponse::message("Order deleted successfully"))
    }

    /// Reenvía el cambio de estado; la legalidad de la transición la decide la API
    pub async fn update_status(
        &self,
        session: &Session,
        id: i64,
        request: UpdateStatusRequest,
    ) -> AppResult<ApiResponse<OrderDetailView>> {
        self.api
            .update_order_status(&session.access_token, id, request.status.clone())
            .await?;
        info!("🚚 Orden {} -> {}", id, request.status.as_str());

        let view = self.detail(session, id).await?;
        Ok(ApiResponse::success_with_message(view, "Order status updated"))
    }
}
