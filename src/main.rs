use std::env;
use std::io::{self, BufRead};

use teller::{AccountAction, Amount, Store, messages};
use tracing_subscriber::EnvFilter;

const EXIT: &str = "exit";
const YES: &str = "y";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "accounts.json".to_string());

    let action = match AccountAction::load(Store::new(path)) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    Console::new(action, stdin.lock()).run();
}

/// The interactive menu loop. It owns all line reading and parsing; the
/// facade receives already-typed inputs. Every prompt accepts the `exit`
/// sentinel to abort the current operation before its final step.
struct Console<R> {
    action: AccountAction,
    input: R,
    current: String,
}

impl<R: BufRead> Console<R> {
    fn new(action: AccountAction, input: R) -> Self {
        Self {
            action,
            input,
            current: String::new(),
        }
    }

    /// Run the session until the user exits or input ends. All the menu
    /// helpers return `None` on end of input, which unwinds the session.
    fn run(&mut self) -> Option<()> {
        println!("{}", messages::WELCOME);
        loop {
            println!("{}", messages::ENTRY_MENU);
            match self.read_line()?.as_str() {
                "create" => {
                    if self.create()? {
                        return self.main_menu();
                    }
                }
                "load" => {
                    if self.load()? {
                        return self.main_menu();
                    }
                }
                EXIT => return Some(()),
                _ => println!("{}", messages::WRONG_COMMAND),
            }
        }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line).ok()? == 0 {
            return None;
        }
        Some(line.trim().to_string())
    }

    fn prompt(&mut self, text: &str) -> Option<String> {
        println!("{text}");
        self.read_line()
    }

    fn confirm(&mut self, text: &str) -> Option<bool> {
        Some(self.prompt(text)? == YES)
    }

    /// Fill the account form, re-prompting on validation errors.
    fn create(&mut self) -> Option<bool> {
        loop {
            let name = self.prompt(messages::USER_NAME)?;
            let age = self.prompt(messages::USER_AGE)?.parse().unwrap_or(0);
            let login = self.prompt(messages::USER_LOGIN)?;
            let password = self.prompt(messages::USER_PASSWORD)?;

            match self.action.create_account(name, age, login, password) {
                Ok(account) => {
                    self.current = account.login().to_string();
                    return Some(true);
                }
                Err(e) => println!("{e}"),
            }
        }
    }

    fn load(&mut self) -> Option<bool> {
        if self.action.no_accounts() {
            return if self.confirm(messages::FIRST_ACCOUNT)? {
                self.create()
            } else {
                Some(false)
            };
        }

        loop {
            let login = self.prompt(messages::USER_LOGIN)?;
            let password = self.prompt(messages::USER_PASSWORD)?;

            if self.action.find_by_login_password(&login, &password).is_some() {
                self.current = login;
                return Some(true);
            }
            println!("{}", messages::USER_NOT_EXISTS);
        }
    }

    fn main_menu(&mut self) -> Option<()> {
        let name = self
            .action
            .find_account(&self.current)
            .map(|a| a.name().to_string())
            .unwrap_or_default();

        loop {
            println!("{}", messages::main_menu(&name));
            match self.read_line()?.as_str() {
                "SC" => self.show_cards(),
                "CC" => self.create_card()?,
                "DC" => self.destroy_card()?,
                "PM" => self.put_money()?,
                "WM" => self.withdraw_money()?,
                "SM" => self.send_money()?,
                "DA" => {
                    if self.destroy_account()? {
                        return Some(());
                    }
                }
                EXIT => return Some(()),
                _ => println!("{}", messages::WRONG_COMMAND),
            }
        }
    }

    fn show_cards(&self) {
        match self.action.find_account(&self.current) {
            Some(account) if !account.cards().is_empty() => {
                for card in account.cards() {
                    println!("- {}, {}", card.number(), card.kind().tag());
                }
            }
            _ => println!("{}", messages::NO_CARDS),
        }
    }

    fn create_card(&mut self) -> Option<()> {
        loop {
            let input = self.prompt(messages::CARD_TYPE_PROMPT)?;
            if input == EXIT {
                return Some(());
            }

            match self.action.create_card(&self.current, &input) {
                Ok(card) => {
                    println!("{}", messages::card_created(card.number()));
                    return Some(());
                }
                Err(e) => println!("{e}"),
            }
        }
    }

    fn destroy_card(&mut self) -> Option<()> {
        let Some(number) = self.choose_card(messages::CHOOSE_CARD_DESTROYING)? else {
            return Some(());
        };

        if self.confirm(&messages::destroy_card_confirm(&number))? {
            if let Err(e) = self.action.destroy_card(&self.current, &number) {
                println!("{e}");
            }
        }
        Some(())
    }

    fn put_money(&mut self) -> Option<()> {
        let Some(number) = self.choose_card(messages::CHOOSE_CARD_PUTTING)? else {
            return Some(());
        };
        let Some(amount) = self.read_amount()? else {
            return Some(());
        };

        match self.action.put_money(&self.current, &number, amount) {
            Ok(receipt) => println!("{}", messages::put_success(&receipt)),
            Err(e) => println!("{e}"),
        }
        Some(())
    }

    fn withdraw_money(&mut self) -> Option<()> {
        let Some(number) = self.choose_card(messages::CHOOSE_CARD_WITHDRAWING)? else {
            return Some(());
        };
        let Some(amount) = self.read_amount()? else {
            return Some(());
        };

        match self
            .action
            .withdraw_money(&self.current, &number, amount)
        {
            Ok(receipt) => println!("{}", messages::withdraw_success(&receipt)),
            Err(e) => println!("{e}"),
        }
        Some(())
    }

    fn send_money(&mut self) -> Option<()> {
        let Some(sender) = self.choose_card(messages::CHOOSE_CARD_SENDING)? else {
            return Some(());
        };
        let recipient = self.prompt(messages::RECIPIENT_NUMBER)?;
        if recipient == EXIT {
            return Some(());
        }
        let Some(amount) = self.read_amount()? else {
            return Some(());
        };

        match self
            .action
            .send_money(&self.current, &sender, &recipient, amount)
        {
            Ok(receipt) => println!("{}", messages::send_success(&receipt)),
            Err(e) => println!("{e}"),
        }
        Some(())
    }

    fn destroy_account(&mut self) -> Option<bool> {
        if self.confirm(messages::DESTROY_ACCOUNT_CONFIRM)? {
            match self.action.destroy_account(&self.current) {
                Ok(_) => return Some(true),
                Err(e) => println!("{e}"),
            }
        }
        Some(false)
    }

    /// Present the current account's cards and read a 1-based choice.
    /// Returns `None` on end of input, `Some(None)` when there is nothing
    /// to choose or the user aborts.
    fn choose_card(&mut self, prompt: &str) -> Option<Option<String>> {
        let cards: Vec<(String, &'static str)> = self
            .action
            .find_account(&self.current)
            .map(|account| {
                account
                    .cards()
                    .iter()
                    .map(|card| (card.number().to_string(), card.kind().tag()))
                    .collect()
            })
            .unwrap_or_default();

        if cards.is_empty() {
            println!("{}", messages::NO_CARDS);
            return Some(None);
        }

        println!("{prompt}");
        for (i, (number, tag)) in cards.iter().enumerate() {
            println!("{}", messages::card_choice(i + 1, number, tag));
        }

        loop {
            let input = self.read_line()?;
            if input == EXIT {
                return Some(None);
            }
            if let Ok(choice) = input.parse::<usize>() {
                if (1..=cards.len()).contains(&choice) {
                    return Some(Some(cards[choice - 1].0.clone()));
                }
            }
            println!("{}", messages::WRONG_NUMBER);
        }
    }

    /// Read an amount, `exit` aborting. Unparseable input becomes zero,
    /// which the engine rejects as not positive.
    fn read_amount(&mut self) -> Option<Option<Amount>> {
        let input = self.prompt(messages::INPUT_AMOUNT)?;
        if input == EXIT {
            return Some(None);
        }
        Some(Some(Amount::from_float(input.parse().unwrap_or(0.0))))
    }
}
