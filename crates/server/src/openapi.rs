use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// `{"error": <title>, "detail": <message>}`
#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub detail: String }

#[derive(ToSchema)]
pub struct ServiceBayDoc { pub id: i32, pub name: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CustomerInputDoc {
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CustomerDoc {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CustomerDetailDoc {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub vehicles: Vec<VehicleDoc>,
    pub reservations: Vec<ReservationDoc>,
}

/// Dates accept RFC 3339 or `YYYY-MM-DD HH:MM[:SS]` (UTC).
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct VehicleInputDoc {
    pub id: Option<i32>,
    pub customer_id: i32,
    pub vin: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: i32,
    pub last_service_date: Option<String>,
    pub next_service_due: Option<String>,
    pub notes: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct VehicleDoc {
    pub id: i32,
    pub customer_id: i32,
    pub vin: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: i32,
    pub last_service_date: Option<String>,
    pub next_service_due: Option<String>,
    pub notes: Option<String>,
}

/// `endTime` must fall in a later minute than `startTime`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ReservationInputDoc {
    pub id: Option<i32>,
    pub service_bay_id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    #[schema(example = "2024-06-14 08:00:00")]
    pub start_time: String,
    #[schema(example = "2024-06-14 09:00:00")]
    pub end_time: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ReservationDoc {
    pub id: i32,
    pub service_bay_id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub start_time: String,
    pub end_time: String,
}

/// Every stored reservation that overlaps the request.
#[derive(ToSchema)]
pub struct ConflictDoc {
    #[schema(example = "Conflict with existing reservations")]
    pub error: String,
    pub reservations: Vec<ReservationDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::handlers::customers::create,
        crate::handlers::customers::list,
        crate::handlers::customers::get,
        crate::handlers::customers::update,
        crate::handlers::customers::delete,
        crate::handlers::vehicles::create,
        crate::handlers::vehicles::list,
        crate::handlers::vehicles::get,
        crate::handlers::vehicles::update,
        crate::handlers::vehicles::delete,
        crate::handlers::reservations::create,
        crate::handlers::reservations::list,
        crate::handlers::reservations::list_by_service_bay,
        crate::handlers::reservations::get,
        crate::handlers::reservations::update,
        crate::handlers::reservations::delete,
        crate::handlers::service_bays::list,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            ServiceBayDoc,
            CustomerInputDoc,
            CustomerDoc,
            CustomerDetailDoc,
            VehicleInputDoc,
            VehicleDoc,
            ReservationInputDoc,
            ReservationDoc,
            ConflictDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "customer"),
        (name = "vehicle"),
        (name = "reservation"),
        (name = "service-bay")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/health",
            "/customer",
            "/customer/{id}",
            "/vehicle",
            "/vehicle/{id}",
            "/reservation",
            "/reservation/{id}",
            "/reservation/by-service-bay/{id}",
            "/service-bay",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
