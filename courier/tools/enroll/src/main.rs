use courier::{ActivityRecord, Courier, ServiceError};
use failure::Error;
use itertools::Itertools;
use log::{debug, error};
use structopt::StructOpt;

#[derive(Clone, Debug, StructOpt)]
#[structopt(
    name = "enroll",
    about = "Lists Mergington activities and manages signups through the registrar"
)]
struct Options {
    /// Registrar Url
    #[structopt(short = "u", long = "url", default_value = "http://127.0.0.1:8000/")]
    url: String,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, StructOpt)]
enum Command {
    /// Show every activity with its participants
    #[structopt(name = "list")]
    List,
    /// Sign a student up for an activity
    #[structopt(name = "signup")]
    Signup { activity: String, email: String },
    /// Remove a student from an activity
    #[structopt(name = "unregister")]
    Unregister { activity: String, email: String },
}

fn render_activity(name: &str, record: &ActivityRecord) -> String {
    let participants = if record.participants.is_empty() {
        "No participants yet".to_string()
    } else {
        record.participants.iter().join(", ")
    };

    format!(
        "{}\n  {}\n  Schedule: {}\n  Availability: {} spots left\n  Participants: {}",
        name,
        record.description,
        record.schedule,
        record.spots_left(),
        participants
    )
}

fn run(options: Options) -> Result<(), Error> {
    let courier = Courier::new(&options.url)?;
    debug!("using registrar at {}", options.url);

    match options.command {
        Command::List => {
            let activities = courier.activities()?;
            let cards = activities
                .iter()
                .map(|(name, record)| render_activity(name, record))
                .join("\n\n");
            println!("{}", cards);
        }
        Command::Signup { activity, email } => println!("{}", courier.signup(&activity, &email)?),
        Command::Unregister { activity, email } => {
            println!("{}", courier.unregister(&activity, &email)?)
        }
    }

    Ok(())
}

fn main() {
    let options = Options::from_args();
    env_logger::init();

    if let Err(e) = run(options) {
        // Service rejections already carry a readable detail
        match e.downcast_ref::<ServiceError>() {
            Some(rejection) => error!("rejected: {}", rejection),
            None => error!("{}", e),
        }
        std::process::exit(1);
    }
}
