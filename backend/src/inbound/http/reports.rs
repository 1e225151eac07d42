//! Analytics dashboard and compliance report handlers.
//!
//! ```text
//! GET /api/v1/analytics/dashboard
//! GET /api/v1/reports/compliance?startDate=2025-01-01&endDate=2025-03-31
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{ComplianceReport, Dashboard, Error, ReportPeriod};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{INVALID_VALUE, parse_date};

/// Optional inclusive date bounds, `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ComplianceQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn parse_period(query: ComplianceQuery) -> Result<ReportPeriod, Error> {
    let start = query
        .start_date
        .as_deref()
        .map(|raw| parse_date(raw, "startDate"))
        .transpose()?;
    let end = query
        .end_date
        .as_deref()
        .map(|raw| parse_date(raw, "endDate"))
        .transpose()?;
    ReportPeriod::new(start, end).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(serde_json::json!({ "field": "endDate", "code": INVALID_VALUE }))
    })
}

/// Aggregate figures for the analytics dashboard.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = Dashboard),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["reports"],
    operation_id = "dashboard"
)]
#[get("/analytics/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Dashboard>> {
    session.require_user_id()?;
    Ok(web::Json(state.dashboard.dashboard().await?))
}

/// Regulatory summary of items created in a period.
#[utoipa::path(
    get,
    path = "/api/v1/reports/compliance",
    params(ComplianceQuery),
    responses(
        (status = 200, description = "Compliance report", body = ComplianceReport),
        (status = 400, description = "Invalid period", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["reports"],
    operation_id = "complianceReport"
)]
#[get("/reports/compliance")]
pub async fn compliance_report(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ComplianceQuery>,
) -> ApiResult<web::Json<ComplianceReport>> {
    session.require_user_id()?;
    let period = parse_period(query.into_inner())?;
    Ok(web::Json(state.compliance.compliance_report(period).await?))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::Value;

    use crate::inbound::http::test_utils::{
        json_body, login_request, memory_state, session_cookie, test_app,
    };

    #[rstest]
    #[case("/api/v1/analytics/dashboard")]
    #[case("/api/v1/reports/compliance")]
    #[actix_web::test]
    async fn reports_require_a_session(#[case] uri: &str) {
        let (state, _store) = memory_state();
        let app = test::init_service(test_app(state)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn empty_store_yields_zeroed_dashboard() {
        let (state, _store) = memory_state();
        let app = test::init_service(test_app(state)).await;
        let login = test::call_service(&app, login_request("admin", "password").to_request()).await;
        let cookie = session_cookie(&login);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/analytics/dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["totalItems"], 0);
        assert_eq!(body["monthlyTrends"], Value::Array(Vec::new()));
    }

    #[rstest]
    #[case("startDate=2025-05-31&endDate=2025-05-01")]
    #[case("startDate=31/05/2025")]
    #[actix_web::test]
    async fn bad_periods_are_rejected(#[case] query: &str) {
        let (state, _store) = memory_state();
        let app = test::init_service(test_app(state)).await;
        let login = test::call_service(&app, login_request("admin", "password").to_request()).await;
        let cookie = session_cookie(&login);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/reports/compliance?{query}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = json_body(res).await;
        assert_eq!(body["code"], "invalid_request");
    }

    #[actix_web::test]
    async fn compliance_report_echoes_the_period() {
        let (state, _store) = memory_state();
        let app = test::init_service(test_app(state)).await;
        let login = test::call_service(&app, login_request("admin", "password").to_request()).await;
        let cookie = session_cookie(&login);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/reports/compliance?startDate=2025-05-01&endDate=2025-05-31")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["period"]["start"], "2025-05-01");
        assert_eq!(body["period"]["end"], "2025-05-31");
        assert_eq!(body["totalItems"], 0);
    }
}
