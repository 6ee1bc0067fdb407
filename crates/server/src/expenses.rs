//! Expense endpoints.

use api_types::{
    Amount,
    expense::{Expense, ExpenseNew, Split},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use engine::{EngineError, ExpenseCmd, ExpenseDetail, MoneyCents, Share};

use crate::{ServerError, server::ServerState};

fn parse_amount(value: &Amount) -> Result<MoneyCents, EngineError> {
    match value {
        Amount::Number(number) => MoneyCents::from_decimal(*number),
        Amount::Text(text) => text.parse(),
    }
}

/// Turns the request body into an engine command, rejecting missing fields.
fn expense_cmd(group_id: i64, payload: ExpenseNew) -> Result<ExpenseCmd, ServerError> {
    let payer_id = payload
        .payer_id
        .filter(|id| *id != 0)
        .ok_or_else(|| ServerError::Generic("payer required".to_string()))?;
    let amount = payload
        .amount
        .as_ref()
        .ok_or_else(|| ServerError::Generic("amount required".to_string()))
        .and_then(|amount| parse_amount(amount).map_err(ServerError::from))?;

    let cmd = ExpenseCmd::new(group_id, amount, payer_id).title(payload.title);
    if payload.equal_split {
        return Ok(cmd);
    }

    let shares = payload
        .splits
        .iter()
        .map(|split| Ok(Share::new(split.member_id, parse_amount(&split.share)?)))
        .collect::<Result<Vec<_>, EngineError>>()?;
    Ok(cmd.shares(shares))
}

fn expense_view(detail: ExpenseDetail) -> Expense {
    let ExpenseDetail {
        expense,
        payer_name,
        splits,
    } = detail;

    Expense {
        id: expense.id,
        group_id: expense.group_id,
        title: expense.title,
        amount: expense.amount.to_decimal(),
        payer_id: expense.payer_id,
        payer_name,
        created_at: expense.created_at,
        splits: splits
            .into_iter()
            .map(|detail| Split {
                id: detail.split.id,
                expense_id: detail.split.expense_id,
                member_id: detail.split.member_id,
                member_name: detail.member_name,
                share: detail.split.share.to_decimal(),
            })
            .collect(),
    }
}

pub async fn list(
    State(state): State<ServerState>,
    WithRejection(Path(group_id), _): WithRejection<Path<i64>, ServerError>,
) -> Result<Json<Vec<Expense>>, ServerError> {
    let expenses = state.engine.list_expenses(group_id).await?;
    Ok(Json(expenses.into_iter().map(expense_view).collect()))
}

pub async fn expense_new(
    State(state): State<ServerState>,
    WithRejection(Path(group_id), _): WithRejection<Path<i64>, ServerError>,
    WithRejection(Json(payload), _): WithRejection<Json<ExpenseNew>, ServerError>,
) -> Result<(StatusCode, Json<Expense>), ServerError> {
    let cmd = expense_cmd(group_id, payload)?;
    let detail = state.engine.create_expense(cmd).await?;
    Ok((StatusCode::CREATED, Json(expense_view(detail))))
}

#[cfg(test)]
mod tests {
    use api_types::expense::SplitNew;

    use super::*;

    fn payload(json: &str) -> ExpenseNew {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn missing_payer_is_rejected() {
        let err = expense_cmd(1, payload(r#"{"amount": 10}"#)).unwrap_err();
        assert!(matches!(err, ServerError::Generic(msg) if msg == "payer required"));

        let err = expense_cmd(1, payload(r#"{"amount": 10, "payer_id": 0}"#)).unwrap_err();
        assert!(matches!(err, ServerError::Generic(_)));
    }

    #[test]
    fn amount_strings_are_coerced() {
        let cmd = expense_cmd(1, payload(r#"{"amount": "12,50", "payer_id": 3}"#)).unwrap();
        assert_eq!(cmd.amount, MoneyCents::new(1250));
        assert_eq!(cmd.split, engine::SplitMode::Equal);
    }

    #[test]
    fn invalid_amounts_map_to_engine_errors() {
        let err = expense_cmd(1, payload(r#"{"amount": "ten", "payer_id": 3}"#)).unwrap_err();
        assert!(matches!(err, ServerError::Engine(EngineError::InvalidAmount(_))));
    }

    #[test]
    fn explicit_splits_are_forwarded() {
        let body = ExpenseNew {
            title: "Dinner".to_string(),
            amount: Some(Amount::Number(30.0)),
            payer_id: Some(1),
            equal_split: false,
            splits: vec![
                SplitNew {
                    member_id: 1,
                    share: Amount::Number(10.0),
                },
                SplitNew {
                    member_id: 2,
                    share: Amount::Text("20".to_string()),
                },
            ],
        };
        let cmd = expense_cmd(7, body).unwrap();
        assert_eq!(cmd.group_id, 7);
        assert_eq!(
            cmd.split,
            engine::SplitMode::Explicit(vec![
                Share::new(1, MoneyCents::new(1000)),
                Share::new(2, MoneyCents::new(2000)),
            ])
        );
    }
}
