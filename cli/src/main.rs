//! prbridge CLI - pull request automation for Jira

mod client;
mod comment;
mod github;
mod jira;
mod output;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use prbridge::{
    branch_issue_keys, check_title, format_keys, issue_keys_in_title, select_fix_version,
    select_reviewers, split_list, Converter, FixVersionDecision, JsonFormat, TitleCheck,
};

use crate::comment::{download_images, post_to_issues};
use crate::github::{GitHubClient, DEFAULT_API_URL};
use crate::jira::JiraClient;
use crate::output::ActionOutput;

#[derive(Parser)]
#[command(name = "prbridge")]
#[command(version)]
#[command(about = "Pull request automation for Jira", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Markdown PR body to ADF JSON (offline)
    Convert {
        /// Input Markdown file (stdin if not specified)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output plain text instead of ADF
        #[arg(long)]
        text: bool,

        /// Keep everything after the checklist marker
        #[arg(long)]
        no_cutoff: bool,

        /// Replace attachment URLs with placeholders
        #[arg(long)]
        placeholders: bool,
    },

    /// Post the PR body as a comment on every issue in the PR title
    Comment {
        #[command(flatten)]
        jira: JiraArgs,

        /// Pull request title
        #[arg(long, env = "PR_TITLE")]
        pr_title: String,

        /// Pull request body (Markdown)
        #[arg(long, env = "PR_BODY", default_value = "")]
        pr_body: String,

        /// Re-host images attached to the PR body on each issue
        #[arg(long)]
        attachments: bool,

        /// Token used to download PR attachments
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        github_token: Option<String>,
    },

    /// Check that the PR title starts with the branch's issue keys
    CheckIssueKey {
        /// Head branch name
        #[arg(long, env = "BRANCH_NAME")]
        branch_name: String,

        /// Jira project key
        #[arg(long, env = "PROJECT_KEY")]
        project_key: String,

        /// Pull request title
        #[arg(long, env = "CURRENT_PR_TITLE")]
        pr_title: String,
    },

    /// Request reviews from randomly picked candidates
    AssignReviewers {
        #[command(flatten)]
        github: GitHubArgs,

        /// Pull request number
        #[arg(long, env = "PR_NUMBER")]
        pr_number: u64,

        /// Number of reviewers to pick (0 picks everyone)
        #[arg(long, env = "AMOUNT")]
        amount: usize,

        /// Comma-separated reviewer candidates
        #[arg(long, env = "REVIEWER_CANDIDATES")]
        candidates: String,

        /// Comma-separated logins never picked
        #[arg(long, env = "EXCLUDE_MEMBERS", default_value = "")]
        exclude_members: String,
    },

    /// Set the issue's fixVersion from the PR base branch
    ReleaseVersion {
        #[command(flatten)]
        jira: JiraArgs,

        /// Jira issue key
        #[arg(long, env = "ISSUE_KEY")]
        issue_key: String,

        /// Jira project key
        #[arg(long, env = "PROJECT_KEY")]
        project_key: String,

        /// Pull request base branch
        #[arg(long, env = "PR_BASE_BRANCH")]
        base_branch: String,

        /// Comma-separated release branch names
        #[arg(long, env = "GITHUB_RELEASE_BRANCHES", default_value = "")]
        release_branches: String,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct JiraArgs {
    /// Jira site URL
    #[arg(long, env = "JIRA_BASE_URL")]
    jira_base_url: String,

    /// Jira account email
    #[arg(long, env = "JIRA_USER_EMAIL")]
    jira_user_email: String,

    /// Jira API token
    #[arg(long, env = "JIRA_API_TOKEN", hide_env_values = true)]
    jira_api_token: String,
}

impl JiraArgs {
    fn client(&self) -> JiraClient {
        JiraClient::new(
            &self.jira_base_url,
            &self.jira_user_email,
            &self.jira_api_token,
        )
    }
}

#[derive(Args)]
struct GitHubArgs {
    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: String,

    /// Repository as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// GitHub API URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    github_api_url: String,
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            compact,
            text,
            no_cutoff,
            placeholders,
        } => cmd_convert(
            input.as_deref(),
            output.as_deref(),
            compact,
            text,
            no_cutoff,
            placeholders,
        ),
        Commands::Comment {
            jira,
            pr_title,
            pr_body,
            attachments,
            github_token,
        } => cmd_comment(&jira, &pr_title, &pr_body, attachments, github_token),
        Commands::CheckIssueKey {
            branch_name,
            project_key,
            pr_title,
        } => cmd_check_issue_key(&branch_name, &project_key, &pr_title),
        Commands::AssignReviewers {
            github,
            pr_number,
            amount,
            candidates,
            exclude_members,
        } => cmd_assign_reviewers(&github, pr_number, amount, &candidates, &exclude_members),
        Commands::ReleaseVersion {
            jira,
            issue_key,
            project_key,
            base_branch,
            release_branches,
        } => cmd_release_version(
            &jira,
            &issue_key,
            &project_key,
            &base_branch,
            &release_branches,
        ),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: Option<&Path>,
    output: Option<&Path>,
    compact: bool,
    text: bool,
    no_cutoff: bool,
    placeholders: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let markdown = match input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut converter = Converter::new();
    if no_cutoff {
        converter = converter.without_cutoff();
    }
    if placeholders {
        converter = converter.with_placeholders();
    }
    let conversion = converter.parse(&markdown)?;

    let rendered = if text {
        conversion.plain_text()?
    } else if compact {
        conversion.to_json(JsonFormat::Compact)?
    } else {
        conversion.to_json(JsonFormat::Pretty)?
    };

    if let Some(output_path) = output {
        fs::write(output_path, &rendered)?;
        println!("{} {}", "Written to".green(), output_path.display());
        for attachment in &conversion.attachments {
            println!("  {} {}", attachment.name.cyan(), attachment.url);
        }
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_comment(
    jira: &JiraArgs,
    pr_title: &str,
    pr_body: &str,
    attachments: bool,
    github_token: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let issue_keys = issue_keys_in_title(pr_title)?;
    if issue_keys.is_empty() {
        return Err(format!("No issue keys found in PR title: {}", pr_title).into());
    }
    println!("{} {}", "Issue keys:".cyan(), format_keys(&issue_keys));

    let mut converter = Converter::new();
    if attachments {
        converter = converter.with_placeholders();
    }
    let conversion = converter.parse(pr_body)?;

    let jira_client = jira.client();
    let rt = tokio::runtime::Runtime::new()?;

    let report = rt.block_on(async {
        let images = if conversion.attachments.is_empty() {
            Vec::new()
        } else {
            let token = github_token.ok_or("GITHUB_TOKEN is required to download attachments")?;
            let github = GitHubClient::new(DEFAULT_API_URL, "", token)?;

            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
            pb.set_message(format!(
                "Downloading {} attachment(s)...",
                conversion.attachments.len()
            ));
            let images = download_images(&github, &conversion.attachments).await;
            pb.finish_and_clear();
            images?
        };

        let report = post_to_issues(&jira_client, &issue_keys, &conversion, &images).await?;
        Ok::<_, Box<dyn std::error::Error>>(report)
    })?;

    for (issue_key, result) in &report.results {
        match result {
            Ok(posted) => println!("{} {} (comment {})", "✓".green(), issue_key, posted.id),
            Err(e) => println!("{} {}: {}", "✗".red(), issue_key, e),
        }
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(format!(
            "{} of {} comment(s) failed",
            report.failures(),
            report.results.len()
        )
        .into())
    }
}

fn cmd_check_issue_key(
    branch_name: &str,
    project_key: &str,
    pr_title: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = ActionOutput::from_env();
    let branch_keys = branch_issue_keys(branch_name, project_key)?;

    if branch_keys.is_empty() {
        println!("{}", "No issue keys found in branch name.".yellow());
    } else {
        println!("Extracted issue keys: {}", branch_keys.join(", "));
        output.set("jira_issue_key", format_keys(&branch_keys))?;
    }

    let check = check_title(&branch_keys, pr_title, project_key)?;
    match &check {
        TitleCheck::Matches(keys) => {
            println!(
                "{} [{}]",
                "PR title starts with the exact issue keys:".green(),
                keys.join(", ")
            );
        }
        TitleCheck::OtherKeys(keys) => {
            println!(
                "{} [{}]",
                "PR title contains different issue keys:".yellow(),
                keys.join(", ")
            );
        }
        TitleCheck::Missing => {
            println!("PR title: {}", pr_title);
            println!(
                "{} {}",
                "PR title does not start with any of the issue keys:".yellow(),
                format_keys(&branch_keys)
            );
        }
    }

    output.set("pr_title_starts_with_issue_key", check.starts_with_issue_key())?;
    if let Some(other) = check.starts_with_other_issue_key() {
        output.set("pr_title_starts_with_other_issue_key", other)?;
    }

    Ok(())
}

fn cmd_assign_reviewers(
    github: &GitHubArgs,
    pr_number: u64,
    amount: usize,
    candidates: &str,
    exclude_members: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = GitHubClient::new(
        &github.github_api_url,
        &github.repository,
        &github.github_token,
    )?;
    let candidates = split_list(candidates);
    let exclude = split_list(exclude_members);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let author = client.pull_request_author(pr_number).await?;
        let reviewers =
            select_reviewers(&candidates, &author, &exclude, amount, &mut rand::thread_rng());

        if reviewers.is_empty() {
            println!("{}", "No members to assign".yellow());
            return Ok(());
        }

        println!("Picked {} reviewer(s): {}", reviewers.len(), reviewers.join(", "));
        let requested = client.request_reviewers(pr_number, &reviewers).await?;
        println!(
            "{} PR #{}: {}",
            "Reviewers requested for".green(),
            pr_number,
            requested.join(",")
        );

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

fn cmd_release_version(
    jira: &JiraArgs,
    issue_key: &str,
    project_key: &str,
    base_branch: &str,
    release_branches: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = jira.client();
    let release_branches = split_list(release_branches);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let current = client.fix_versions(issue_key).await?;
        let unreleased = client.unreleased_versions(project_key).await?;
        println!("Unreleased fixVersions: {}", unreleased.join(", "));
        if !release_branches.is_empty() {
            println!("Release branches: {}", release_branches.join(", "));
        }

        let decision = select_fix_version(&current, &unreleased, base_branch, &release_branches)?;
        match &decision {
            FixVersionDecision::Keep(version) => {
                println!(
                    "{} {}",
                    "fixVersion already correct:".green(),
                    version
                );
            }
            FixVersionDecision::Update { from, to } => {
                println!(
                    "Updating fixVersion of {}: {} -> {}",
                    issue_key,
                    from.as_deref().unwrap_or("(none)"),
                    to
                );
                client.set_fix_version(issue_key, to).await?;
                println!("{} {}", "Issue updated with fixVersion".green(), to);
            }
        }

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

fn cmd_version() {
    println!("{} {}", "prbridge".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Pull request automation for Jira");
    println!();
    println!("License: MIT");
}
