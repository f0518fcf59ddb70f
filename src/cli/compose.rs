use std::process;

use beehive::domain::{Composer, validation::validate};
use clap::Parser;
use tracing::instrument;

use super::{Context, form::FormArgs, validate::print_errors};

#[derive(Debug, Parser)]
#[command(about = "Print the email an inquiry would produce, without sending it")]
pub struct Compose {
    #[command(flatten)]
    form: FormArgs,

    /// Print the mailto link instead of the message
    #[arg(long)]
    uri: bool,
}

impl Compose {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let config = context.config()?;
        let form = self.form.into_form()?;

        let inquiry = match validate(&form, &config.rules()) {
            Ok(inquiry) => inquiry,
            Err(errors) => {
                print_errors(&errors);
                process::exit(2);
            }
        };

        let message = Composer::from_config(&config).compose(&inquiry);

        if self.uri {
            println!("{}", message.mailto_uri());
        } else {
            println!("To: {}", message.to);
            println!("Subject: {}", message.subject);
            println!();
            print!("{}", message.body);
        }

        Ok(())
    }
}
