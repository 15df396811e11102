use std::{fs, path::Path};

use api_types::{
    expense::{ExpenseCreate, ExpenseView},
    group::Member,
};
use engine::{AllocationEntry, AllocationSession, EngineError, MoneyCents};
use serde::{Serialize, de::DeserializeOwned};

use crate::{cli::Command, error::Result};

/// What the binary prints: the settled entries, the current issue and, when
/// the form is complete, the body that would be submitted.
#[derive(Debug, Serialize)]
pub struct Report {
    pub total: Option<MoneyCents>,
    pub entries: Vec<AllocationEntry>,
    pub issue: Option<String>,
    pub expense: Option<ExpenseCreate>,
}

pub fn run(command: Command) -> Result<Report> {
    match command {
        Command::Split {
            members,
            total,
            description,
            paid_by,
            excluded,
            pins,
        } => {
            let members: Vec<Member> = read_json(&members)?;
            let mut session = AllocationSession::create(0, members, None);
            session.set_description(&description)?;
            if session.set_total_input(&total)?.is_none() {
                tracing::warn!(total = %total, "total is not a valid amount");
            }
            if let Some(payer) = paid_by {
                session.set_paid_by(payer)?;
            }
            for member_id in excluded {
                session.toggle(member_id)?;
            }
            for (member_id, amount) in pins {
                let pinned = session.set_manual(member_id, &amount)?;
                if pinned != MoneyCents::parse_lenient(&amount) {
                    tracing::warn!(member_id, requested = %amount, %pinned, "pin was capped");
                }
            }
            report(session)
        }
        Command::Import { members, expense } => {
            let members: Vec<Member> = read_json(&members)?;
            let expense: ExpenseView = read_json(&expense)?;
            tracing::info!(expense_id = expense.id, "importing stored expense");
            let session = AllocationSession::edit(0, members, &expense, None);
            report(session)
        }
    }
}

fn report(mut session: AllocationSession) -> Result<Report> {
    let mut report = Report {
        total: session.total(),
        entries: session.entries().to_vec(),
        issue: session.issue().map(|issue| issue.to_string()),
        expense: None,
    };

    match session.begin_submit() {
        Ok(pending) => report.expense = Some(pending.request().expense().clone()),
        Err(EngineError::Invalid(issue)) => {
            if report.issue.is_none() {
                report.issue = Some(issue.to_string());
            }
        }
        Err(err) => return Err(err.into()),
    }
    session.close();
    Ok(report)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
