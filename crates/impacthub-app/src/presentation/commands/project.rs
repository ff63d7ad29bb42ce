use impacthub_domain::project::{Comment, Project, ProjectQuery, SupportOutcome};
use impacthub_domain::ProjectId;
use serde_json::json;

use crate::presentation::cli::{CommentCommand, ProjectCommand};
use crate::presentation::error::CommandError;
use crate::presentation::output::Printer;
use crate::presentation::state::AppState;

fn project_line(project: &Project) -> String {
    let supported = if project.is_supported { " *" } else { "" };
    format!(
        "#{} {} [{}] {} supporters{}",
        project.id, project.title, project.impact_area, project.supporters_count, supported
    )
}

fn project_list(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects yet.".to_string();
    }
    projects.iter().map(project_line).collect::<Vec<_>>().join("\n")
}

fn comment_line(comment: &Comment) -> String {
    let when = comment
        .created_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    format!("{} ({}): {}", comment.user.display_name(), when, comment.content)
}

fn comment_list(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "No comments yet.".to_string();
    }
    comments.iter().map(comment_line).collect::<Vec<_>>().join("\n")
}

pub async fn projects(
    state: &AppState,
    printer: &Printer,
    action: ProjectCommand,
) -> Result<(), CommandError> {
    let service = &state.services.projects;

    match action {
        ProjectCommand::List { search, area, sort } => {
            let query = ProjectQuery::new()
                .with_search(search.unwrap_or_default())
                .with_area(area)
                .with_sort(sort);
            let projects = service.list(&query).await?;
            printer.emit(&projects, || project_list(&projects))
        }
        ProjectCommand::Show { id } => {
            let (project, comments) = service.detail(id).await?;
            printer.emit(&json!({ "project": project, "comments": comments }), || {
                let mut text = project_line(&project);
                if let Some(url) = project.image_url.as_deref().filter(|u| !u.is_empty()) {
                    text.push_str(&format!("\nImage: {}", url));
                }
                text.push_str(&format!("\n\n{}\n\nComments:\n{}", project.description, comment_list(&comments)));
                text
            })
        }
        ProjectCommand::Create {
            title,
            impact_area,
            description,
            image_url,
        } => {
            let project = service
                .create(&title, &impact_area, &description, image_url)
                .await?;
            printer.emit(&project, || format!("Created {}", project_line(&project)))
        }
    }
}

pub async fn support(state: &AppState, printer: &Printer, id: ProjectId) -> Result<(), CommandError> {
    let (outcome, project) = state.services.projects.support(id).await?;

    let already = outcome == SupportOutcome::AlreadySupported;
    printer.emit(
        &json!({ "already_supported": already, "project": project }),
        || {
            let headline = if already {
                "You already support this project."
            } else {
                "Thanks for your support!"
            };
            format!("{}\n{}", headline, project_line(&project))
        },
    )
}

pub async fn comments(
    state: &AppState,
    printer: &Printer,
    action: CommentCommand,
) -> Result<(), CommandError> {
    let service = &state.services.projects;

    match action {
        CommentCommand::List { project } => {
            let comments = service.comments(project).await?;
            printer.emit(&comments, || comment_list(&comments))
        }
        CommentCommand::Add { project, content } => {
            let comment = service.add_comment(project, &content).await?;
            printer.emit(&comment, || format!("Posted: {}", comment_line(&comment)))
        }
    }
}

pub async fn dashboard(state: &AppState, printer: &Printer) -> Result<(), CommandError> {
    let dashboard = state.services.projects.dashboard().await?;

    printer.emit(
        &json!({
            "my_projects": dashboard.my_projects,
            "supported_projects": dashboard.supported_projects,
            "stats": dashboard.stats,
        }),
        || {
            format!(
                "Projects created: {}\nProjects supported: {}\nImpact reach: {}\n\nMy projects:\n{}\n\nSupported projects:\n{}",
                dashboard.stats.total_projects,
                dashboard.stats.total_supported,
                dashboard.stats.impact_reach,
                project_list(&dashboard.my_projects),
                project_list(&dashboard.supported_projects),
            )
        },
    )
}
