use tg_db::updates::decision::DecisionUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_due, parse_position};
use crate::context::AppContext;
use crate::output::output;

pub struct UpdateArgs<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub status: &'a [String],
    pub priority: &'a [String],
    pub due: Option<&'a str>,
    pub outcome: Option<&'a str>,
    pub position: Option<&'a str>,
}

impl UpdateArgs<'_> {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_empty()
            && self.priority.is_empty()
            && self.due.is_none()
            && self.outcome.is_none()
            && self.position.is_none()
    }
}

pub async fn run(
    id: &str,
    args: UpdateArgs<'_>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if args.is_empty() {
        anyhow::bail!(
            "At least one of --title, --description, --status, --priority, --due, --outcome, \
             or --position must be provided"
        );
    }
    let actor = ctx.actor()?;

    let mut builder = DecisionUpdateBuilder::new();
    if let Some(title) = args.title {
        builder = builder.title(title);
    }
    if let Some(description) = args.description {
        builder = builder.description(Some(description.to_string()));
    }
    if !args.status.is_empty() {
        builder = builder.status(Some(args.status.to_vec()));
    }
    if !args.priority.is_empty() {
        builder = builder.priority(Some(args.priority.to_vec()));
    }
    if let Some(due) = args.due {
        builder = builder.due_date(Some(parse_due(due)?));
    }
    if let Some(outcome) = args.outcome {
        builder = builder.outcome(Some(outcome.to_string()));
    }
    if let Some(position) = args.position {
        builder = builder.position(parse_position(position)?);
    }

    let decision = ctx
        .service
        .update_decision(&actor, id, builder.build())
        .await?;
    output(&decision, flags.format)
}
