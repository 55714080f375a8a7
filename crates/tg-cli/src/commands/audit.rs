use tg_core::entities::AuditEntry;
use tg_core::enums::{AuditAction, EntityType};
use tg_db::repos::audit::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tg audit`.
pub async fn handle(args: &AuditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entries = fetch(args, ctx, flags).await?;
    output(&entries, flags.format)
}

async fn fetch(
    args: &AuditArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<Vec<AuditEntry>> {
    let filter = build_filter(args, ctx.team_id()?, effective_limit(None, flags.limit, 50))?;
    ctx.service.query_audit(&filter).await.map_err(Into::into)
}

fn build_filter(args: &AuditArgs, team_id: String, limit: u32) -> anyhow::Result<AuditFilter> {
    Ok(AuditFilter {
        team_id,
        entity_type: args
            .entity_type
            .as_deref()
            .map(|value| parse_enum::<EntityType>(value, "entity-type"))
            .transpose()?,
        entity_id: args.entity_id.clone(),
        action: args
            .action
            .as_deref()
            .map(|value| parse_enum::<AuditAction>(value, "action"))
            .transpose()?,
        limit: Some(limit),
    })
}

#[cfg(test)]
mod tests {
    use tg_core::enums::{AuditAction, EntityType};

    use super::build_filter;
    use crate::cli::root_commands::AuditArgs;

    #[test]
    fn filter_parses_enums() {
        let args = AuditArgs {
            entity_type: Some("decision".into()),
            entity_id: Some("dec-1".into()),
            action: Some("moved".into()),
        };
        let filter = build_filter(&args, "team-1".into(), 10).expect("filter should build");
        assert_eq!(filter.team_id, "team-1");
        assert_eq!(filter.entity_type, Some(EntityType::Decision));
        assert_eq!(filter.action, Some(AuditAction::Moved));
        assert_eq!(filter.limit, Some(10));
    }

    #[test]
    fn filter_rejects_unknown_action() {
        let args = AuditArgs {
            entity_type: None,
            entity_id: None,
            action: Some("archived".into()),
        };
        assert!(build_filter(&args, "team-1".into(), 10).is_err());
    }
}
