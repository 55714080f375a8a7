use tg_db::updates::decision::NewDecision;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{non_empty, parse_due, parse_position};
use crate::context::AppContext;
use crate::output::output;

pub struct CreateArgs<'a> {
    pub title: &'a str,
    pub parent: Option<&'a str>,
    pub order: Option<f64>,
    pub description: Option<&'a str>,
    pub status: &'a [String],
    pub priority: &'a [String],
    pub due: Option<&'a str>,
    pub outcome: Option<&'a str>,
    pub position: Option<&'a str>,
}

pub async fn run(args: CreateArgs<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = ctx.actor()?;
    let new = NewDecision {
        parent_id: args.parent.map(str::to_string),
        order: args.order,
        title: args.title.to_string(),
        description: args.description.map(str::to_string),
        status: non_empty(args.status),
        position: args.position.map(parse_position).transpose()?,
        due_date: args.due.map(parse_due).transpose()?,
        priority: non_empty(args.priority),
        outcome: args.outcome.map(str::to_string),
    };

    let decision = ctx.service.create_decision(&actor, new).await?;
    output(&decision, flags.format)
}
