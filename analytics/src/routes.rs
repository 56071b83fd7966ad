use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::bucket::{BucketMap, count_records};
use crate::cohorts::cohorts;
use crate::customers::repeat_customers;
use crate::distribution::city_distribution;
use crate::error::AnalyticsError;
use crate::granularity::Granularity;
use crate::growth::growth_rate;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/total-sales", get(total_sales))
        .route("/sales-growth-rate", get(sales_growth_rate))
        .route("/new-customers", get(new_customers))
        .route("/repeat-customers", get(repeat_customers_by_bucket))
        .route("/geographical-distribution", get(geographical_distribution))
        .route("/customer-lifetime-value", get(customer_lifetime_value));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .with_state(state)
}

#[derive(Deserialize)]
pub struct IntervalQuery {
    interval: Option<String>,
}

impl IntervalQuery {
    fn granularity(&self, default: Granularity) -> Granularity {
        Granularity::resolve(self.interval.as_deref(), default)
    }
}

/// Any failed computation is reported as a 500 with the cause in `error`.
pub struct ApiError(AnalyticsError);

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "metric computation failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPeriod {
    period: String,
    total_sales: f64,
}

fn pairs<T>(buckets: BucketMap<T>) -> Vec<(String, T)> {
    buckets.into_iter().collect()
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn total_sales(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IntervalQuery>,
) -> ApiResult<Vec<SalesPeriod>> {
    let granularity = query.granularity(Granularity::Daily);
    let sales = state.store.sales_by_bucket(granularity)?;
    debug!(interval = granularity.as_str(), buckets = sales.len(), "total sales");

    Ok(Json(
        sales
            .into_iter()
            .map(|(period, total_sales)| SalesPeriod {
                period,
                total_sales,
            })
            .collect(),
    ))
}

pub async fn sales_growth_rate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IntervalQuery>,
) -> ApiResult<BucketMap<f64>> {
    let granularity = query.granularity(Granularity::Daily);
    let sales = state.store.sales_by_bucket(granularity)?;
    let rates = growth_rate(&sales);
    debug!(interval = granularity.as_str(), buckets = rates.len(), "sales growth rate");
    Ok(Json(rates))
}

pub async fn new_customers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IntervalQuery>,
) -> ApiResult<Vec<(String, u64)>> {
    let granularity = query.granularity(Granularity::Daily);
    let customers = state.store.customers()?;
    let counts = count_records(&customers, granularity)?;
    debug!(interval = granularity.as_str(), buckets = counts.len(), "new customers");
    Ok(Json(pairs(counts)))
}

pub async fn repeat_customers_by_bucket(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IntervalQuery>,
) -> ApiResult<Vec<(String, u64)>> {
    let granularity = query.granularity(Granularity::Daily);
    let orders = state.store.orders()?;
    let repeats = repeat_customers(&orders, granularity);
    debug!(interval = granularity.as_str(), buckets = repeats.len(), "repeat customers");
    Ok(Json(pairs(repeats)))
}

pub async fn geographical_distribution(
    State(state): State<Arc<AppState>>,
) -> ApiResult<HashMap<String, u64>> {
    let customers = state.store.customers()?;
    let cities = city_distribution(&customers);
    debug!(cities = cities.len(), "geographical distribution");
    Ok(Json(cities))
}

pub async fn customer_lifetime_value(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IntervalQuery>,
) -> ApiResult<BucketMap<f64>> {
    let granularity = query.granularity(Granularity::Monthly);
    let orders = state.store.orders()?;
    let totals = cohorts(&orders, granularity)?;
    debug!(interval = granularity.as_str(), cohorts = totals.len(), "customer lifetime value");
    Ok(Json(totals))
}
