use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use fox_reviews::account::{services as account, AccountUpdateForm};
use fox_reviews::auth::{
    services as auth, ForgotPasswordForm, LoginForm, RegisterForm, ResetPasswordForm, Session,
};
use fox_reviews::billing::{services as billing, Plan, PortalRedirector};
use fox_reviews::company::{services as company, CompanyForm, CompanyPatch};
use fox_reviews::contact::{services as contact, ContactForm};
use fox_reviews::reviews::{services as reviews, ReviewSummary};
use fox_reviews::search::SearchFilters;
use fox_reviews::submission::{Outcome, Submission};
use fox_reviews::{posts, AppContext};

#[derive(Parser)]
#[command(name = "fox-reviews", version, about = "FOX-Reviews client")]
struct Cli {
    /// Access token of a previous login.
    #[arg(long, global = true, env = "FOX_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FOX_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        accept_terms: bool,
    },
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    Me,
    Account {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        current_password: Option<String>,
        #[arg(long)]
        new_password: Option<String>,
        #[arg(long)]
        confirm_new_password: Option<String>,
    },
    Categories,
    #[command(subcommand)]
    Company(CompanyCommand),
    Search(SearchArgs),
    Reviews {
        company_id: Uuid,
        /// Only genuine five-star reviews.
        #[arg(long)]
        decrypted: bool,
    },
    Visibility {
        company_id: Uuid,
    },
    Subscription,
    Checkout {
        #[arg(long)]
        plan: Plan,
        #[arg(long, default_value_t = 1)]
        months: u8,
    },
    /// Prints the billing portal URL.
    Portal {
        #[arg(long)]
        return_route: Option<String>,
    },
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
    Posts,
}

#[derive(Subcommand)]
enum CompanyCommand {
    Mine,
    Show { id: Uuid },
    Create(CompanyArgs),
    Update {
        id: Uuid,
        #[command(flatten)]
        fields: PatchArgs,
    },
    Delete { id: Uuid },
}

#[derive(Args)]
struct CompanyArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    postal_code: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    website: Option<String>,
    #[arg(long)]
    siret: Option<String>,
    #[arg(long)]
    category: Uuid,
    #[arg(long)]
    sub_category: Option<Uuid>,
    #[arg(long)]
    description: String,
    #[arg(long)]
    hours: Option<String>,
}

#[derive(Args)]
struct PatchArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    postal_code: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    website: Option<String>,
    #[arg(long)]
    siret: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    hours: Option<String>,
}

#[derive(Args)]
struct SearchArgs {
    #[arg(long)]
    q: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    category: Option<Uuid>,
    #[arg(long)]
    sub_category: Option<Uuid>,
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = 20)]
    page_size: u32,
}

impl From<PatchArgs> for CompanyPatch {
    fn from(a: PatchArgs) -> Self {
        CompanyPatch {
            name: a.name,
            address: a.address,
            postal_code: a.postal_code,
            city: a.city,
            phone: a.phone,
            email: a.email,
            website: a.website,
            siret: a.siret,
            description: a.description,
            hours: a.hours,
            ..CompanyPatch::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "fox_reviews=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    let mut ctx = AppContext::init()?;
    if let Some(token) = cli.token {
        ctx = ctx.with_session(Session::new(token));
    }

    run(&ctx, cli.command).await
}

async fn run(ctx: &AppContext, command: Command) -> anyhow::Result<()> {
    let mut submission = Submission::new();
    match command {
        Command::Login { email, password } => {
            let form = LoginForm {
                username: email,
                password,
            };
            let session = settle(submission.run(form, |f| auth::login(ctx, f)).await)?;
            println!("{}", session.access_token);
        }
        Command::Register {
            email,
            password,
            confirm_password,
            first_name,
            last_name,
            accept_terms,
        } => {
            let form = RegisterForm {
                email,
                password,
                confirm_password,
                first_name,
                last_name,
                accept_terms,
            };
            let session = settle(submission.run(form, |f| auth::register(ctx, f)).await)?;
            println!("{}", session.access_token);
        }
        Command::ForgotPassword { email } => {
            let form = ForgotPasswordForm { email };
            let done = settle(
                submission
                    .run(form, |f| auth::request_password_reset(ctx, f))
                    .await,
            )?;
            println!("{}", done.message());
        }
        Command::ResetPassword {
            token,
            password,
            confirm_password,
        } => {
            let form = ResetPasswordForm {
                token,
                password,
                confirm_password,
            };
            settle(submission.run(form, |f| auth::reset_password(ctx, f)).await)?;
            println!("Mot de passe modifié.");
        }
        Command::Me => print_json(&auth::me(ctx).await?)?,
        Command::Account {
            first_name,
            last_name,
            email,
            current_password,
            new_password,
            confirm_new_password,
        } => {
            let form = AccountUpdateForm {
                first_name,
                last_name,
                email,
                current_password,
                new_password,
                confirm_new_password,
            };
            let user = settle(submission.run(form, |f| account::update_account(ctx, f)).await)?;
            print_json(&user)?;
        }
        Command::Categories => print_json(&company::categories(ctx).await?)?,
        Command::Company(cmd) => run_company(ctx, &mut submission, cmd).await?,
        Command::Search(args) => {
            let filters = SearchFilters {
                q: args.q,
                city: args.city,
                category: args.category,
                sub_category: args.sub_category,
                page: args.page,
                page_size: args.page_size,
            };
            let page = settle(
                submission
                    .run(filters, |f| company::search_companies(ctx, f))
                    .await,
            )?;
            print_json(&page)?;
        }
        Command::Reviews {
            company_id,
            decrypted,
        } => {
            let list = if decrypted {
                reviews::decrypted_reviews(ctx, company_id).await?
            } else {
                reviews::company_reviews(ctx, company_id).await?
            };
            print_json(&serde_json::json!({
                "summary": ReviewSummary::from_reviews(&list),
                "reviews": list,
            }))?;
        }
        Command::Visibility { company_id } => {
            print_json(&reviews::visibility(ctx, company_id).await?)?
        }
        Command::Subscription => print_json(&billing::subscription(ctx).await?)?,
        Command::Checkout { plan, months } => {
            let form = billing::checkout_form(ctx, plan, months);
            let checkout = settle(
                submission
                    .run(form, |f| billing::start_checkout(ctx, f))
                    .await,
            )?;
            println!("{}", checkout.url);
        }
        Command::Portal { return_route } => {
            let mut portal = match return_route {
                Some(route) => PortalRedirector::new(route),
                None => PortalRedirector::default(),
            };
            match portal.open(ctx).await {
                Ok(url) => println!("{url}"),
                Err(e) => {
                    let message = portal.error().unwrap_or_default().to_string();
                    return Err(anyhow::Error::new(e).context(message));
                }
            }
        }
        Command::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let form = ContactForm {
                name,
                email,
                subject,
                message,
            };
            settle(submission.run(form, |f| contact::send_message(ctx, f)).await)?;
            println!("Message envoyé.");
        }
        Command::Posts => print_json(&posts::list_posts(ctx).await?)?,
    }
    Ok(())
}

async fn run_company(
    ctx: &AppContext,
    submission: &mut Submission,
    cmd: CompanyCommand,
) -> anyhow::Result<()> {
    match cmd {
        CompanyCommand::Mine => print_json(&company::my_companies(ctx).await?)?,
        CompanyCommand::Show { id } => print_json(&company::get_company(ctx, id).await?)?,
        CompanyCommand::Create(a) => {
            let form = CompanyForm {
                name: a.name,
                address: a.address,
                postal_code: a.postal_code,
                city: a.city,
                phone: a.phone,
                email: a.email,
                website: a.website,
                siret: a.siret,
                category_id: a.category,
                sub_category_id: a.sub_category,
                description: a.description,
                hours: a.hours,
            };
            let created = settle(submission.run(form, |f| company::create_company(ctx, f)).await)?;
            print_json(&created)?;
        }
        CompanyCommand::Update { id, fields } => {
            let patch = CompanyPatch::from(fields);
            let updated = settle(
                submission
                    .run(patch, |p| company::update_company(ctx, id, p))
                    .await,
            )?;
            print_json(&updated)?;
        }
        CompanyCommand::Delete { id } => {
            company::delete_company(ctx, id).await?;
            println!("Entreprise supprimée.");
        }
    }
    Ok(())
}

/// Turns a submission outcome into the command's result, listing field errors.
fn settle<T>(outcome: Outcome<T>) -> anyhow::Result<T> {
    match outcome {
        Outcome::Done(value) => Ok(value),
        Outcome::Invalid(fields) => {
            for e in fields.iter() {
                eprintln!("  {}: {}", e.field, e.message);
            }
            anyhow::bail!("formulaire invalide")
        }
        Outcome::Failed(e) => {
            if let Some(fields) = e.field_errors() {
                for f in fields.iter() {
                    eprintln!("  {}: {}", f.field, f.message);
                }
            }
            Err(anyhow::anyhow!(e.user_message()).context(e))
        }
        Outcome::Refused(e) => Err(e.into()),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
