//! The analysis of the loaded transactions as JSON.

use axum::{Json, extract::State};
use axum_extra::extract::Query;

use crate::{
    Error,
    analysis::{AnalysisReport, FilterQuery},
    session::SessionState,
};

/// Route handler that returns every analysis for the filters in the query
/// string, the same filters the exploratory page accepts.
///
/// Responds with 409 Conflict if no file has been uploaded yet.
pub async fn get_analysis(
    State(state): State<SessionState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<AnalysisReport>, Error> {
    let table = state.current_table()?.ok_or(Error::NoDataLoaded)?;
    let selection = query.resolve(&table);

    Ok(Json(AnalysisReport::build(&table, &selection)))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::Query;
    use serde_json::Value;

    use crate::{
        Error,
        analysis::FilterQuery,
        session::{Session, SessionState},
    };

    use super::get_analysis;

    const FILE: &[u8] = b"Date,Amount\n\
        2022-11-05,500\n\
        2023-01-05,100\n\
        2023-01-20,-30\n\
        2023-02-10,50\n";

    fn get_test_state(file: Option<&[u8]>) -> SessionState {
        let mut session = Session::new();

        if let Some(bytes) = file {
            session.load("transactions.csv", bytes).unwrap();
        }

        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    #[tokio::test]
    async fn returns_report_for_filtered_year() {
        let query = FilterQuery {
            year: Some("2023".to_owned()),
            ..Default::default()
        };

        let report = get_analysis(State(get_test_state(Some(FILE))), Query(query))
            .await
            .unwrap()
            .0;

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["file_name"], Value::from("transactions.csv"));
        assert_eq!(json["row_count"], Value::from(3));
        assert_eq!(json["kpis"]["total_balance"], Value::from(120.0));
        assert_eq!(json["best_months"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["periods"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn conflict_without_data() {
        let result = get_analysis(State(get_test_state(None)), Query(FilterQuery::default())).await;

        let error = result.unwrap_err();
        assert_eq!(error, Error::NoDataLoaded);
        assert_eq!(error.into_response().status(), StatusCode::CONFLICT);
    }
}
