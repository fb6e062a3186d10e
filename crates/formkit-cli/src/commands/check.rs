use formkit_core::lint_fields;

use crate::app::AppContext;
use crate::output::print_issues;
use crate::ui::{badge, kv, print, Badge, OutputMode};

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let ui_ctx = ctx.ui_context(false);

    let forms = match store.persistence().try_load_all() {
        Ok(forms) => forms,
        Err(e) => {
            match ui_ctx.mode {
                OutputMode::Pretty => {
                    eprintln!("{}", badge(&ui_ctx, Badge::Err, "Stored forms are unreadable"));
                }
                OutputMode::Plain | OutputMode::Json => eprintln!("status=FAILED"),
            }
            return Err(anyhow::anyhow!("Stored forms are unreadable: {}", e));
        }
    };

    let mut issue_count = 0;
    for form in &forms {
        let issues = lint_fields(&form.fields);
        if issues.is_empty() {
            continue;
        }
        issue_count += issues.len();
        if !ctx.quiet() {
            eprintln!("{}", kv(&ui_ctx, "Form", &format!("{} ({})", form.name, form.id)));
        }
        print_issues(&ui_ctx, &issues);
    }

    if !ctx.quiet() {
        let location = ctx.store_location()?;
        match ui_ctx.mode {
            OutputMode::Pretty => {
                let kind = if issue_count == 0 { Badge::Ok } else { Badge::Warn };
                print(&ui_ctx, &badge(&ui_ctx, kind, "Store readable"));
                print(&ui_ctx, &format!("  {}", kv(&ui_ctx, "Store", &location.path.display().to_string())));
                print(&ui_ctx, &format!("  {}", kv(&ui_ctx, "Forms", &forms.len().to_string())));
                print(&ui_ctx, &format!("  {}", kv(&ui_ctx, "Issues", &issue_count.to_string())));
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("{}", kv(&ui_ctx, "Store", &location.path.display().to_string()));
                println!("{}", kv(&ui_ctx, "Forms", &forms.len().to_string()));
                println!("{}", kv(&ui_ctx, "Issues", &issue_count.to_string()));
            }
        }
    }
    Ok(())
}
