//! Interactive step prompts
//!
//! Renders one wizard step at a time with dialoguer. The prompter keeps a
//! draft of every step so that going back shows what was typed before.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::core::catalog::RegionCatalog;
use crate::core::record::{Category, COUNTRY};
use crate::wizard::{
    BusinessInput, GstInput, PanInput, Step, StepInput, OTHER_CITY, STEP_COUNT,
};

/// What the user chose after filling in a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Back,
}

/// Prompts for wizard steps, remembering drafts between visits
pub struct StepPrompter {
    theme: ColorfulTheme,
    default_state: Option<String>,
    pub gst: GstInput,
    pub pan: PanInput,
    pub business: BusinessInput,
}

impl StepPrompter {
    pub fn new(default_state: Option<String>) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            default_state,
            gst: GstInput::default(),
            pan: PanInput::default(),
            business: BusinessInput::default(),
        }
    }

    /// Print the step banner
    pub fn header(&self, step: Step) {
        println!();
        println!(
            "{} Step {} of {}: {}",
            style("◆").cyan(),
            step.number(),
            STEP_COUNT,
            style(step.title()).bold()
        );
        println!("{}", style("─".repeat(50)).dim());
    }

    /// Prompt every field of a step and return its input
    pub fn prompt(&mut self, step: Step, catalog: &RegionCatalog) -> Result<Option<StepInput>> {
        let input = match step {
            Step::Gst => {
                self.prompt_gst()?;
                StepInput::Gst(self.gst.clone())
            }
            Step::Pan => {
                self.prompt_pan()?;
                StepInput::Pan(self.pan.clone())
            }
            Step::Business => {
                self.prompt_business(catalog)?;
                StepInput::Business(self.business.clone())
            }
            Step::Complete => return Ok(None),
        };
        Ok(Some(input))
    }

    /// Ask whether to continue or go back; the first step can only continue
    pub fn navigation(&self, step: Step) -> Result<Navigation> {
        if step.previous().is_none() {
            return Ok(Navigation::Next);
        }
        let next_label = if step == Step::Business { "Continue" } else { "Next" };
        let selection = Select::with_theme(&self.theme)
            .items(&[next_label, "Back"])
            .default(0)
            .interact()
            .into_diagnostic()?;
        Ok(if selection == 0 {
            Navigation::Next
        } else {
            Navigation::Back
        })
    }

    fn prompt_gst(&mut self) -> Result<()> {
        let items = [
            "I have a registered business",
            "I don't have a registered business",
        ];
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Business registration")
            .items(&items)
            .default(if self.gst.is_registered { 0 } else { 1 })
            .interact()
            .into_diagnostic()?;
        self.gst.is_registered = selection == 0;

        if self.gst.is_registered {
            let raw = self.text("Enter your GST number", &self.gst.gst_number.clone(), false)?;
            self.gst.set_number(&raw);
        }
        Ok(())
    }

    fn prompt_pan(&mut self) -> Result<()> {
        let raw = self.text("Enter your PAN number", &self.pan.pan_number.clone(), false)?;
        self.pan.set_number(&raw);
        Ok(())
    }

    fn prompt_business(&mut self, catalog: &RegionCatalog) -> Result<()> {
        let draft = self.business.clone();
        self.business.store_name = self.text("Enter your Store Name", &draft.store_name, true)?;

        let labels: Vec<&str> = Category::all().iter().map(|c| c.label()).collect();
        let current = Category::all()
            .iter()
            .position(|c| c.as_str() == draft.category)
            .unwrap_or(0);
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Select Product Category")
            .items(&labels)
            .default(current)
            .interact()
            .into_diagnostic()?;
        self.business.category = Category::all()[selection].as_str().to_string();

        self.business.pincode = self.text("Pincode", &draft.pincode, true)?;
        self.business.address_line1 = self.text("Address Line 1", &draft.address_line1, true)?;
        self.business.address_line2 = self.text("Address Line 2", &draft.address_line2, false)?;

        self.prompt_state(catalog)?;
        self.prompt_city()?;

        println!("  Country: {}", style(COUNTRY).dim());
        Ok(())
    }

    fn prompt_state(&mut self, catalog: &RegionCatalog) -> Result<()> {
        let states: Vec<&str> = catalog.states().collect();
        if states.is_empty() {
            return Err(miette::miette!("No states are available"));
        }
        let preferred = self
            .business
            .location
            .state()
            .map(str::to_string)
            .or_else(|| self.default_state.clone());
        let default_idx = preferred
            .as_deref()
            .and_then(|s| states.iter().position(|st| *st == s))
            .unwrap_or(0);

        let selection = Select::with_theme(&self.theme)
            .with_prompt("Select State")
            .items(&states)
            .default(default_idx)
            .interact()
            .into_diagnostic()?;

        let chosen = states[selection];
        if self.business.location.state() != Some(chosen) {
            self.business.location.select_region(catalog, chosen);
        }
        Ok(())
    }

    fn prompt_city(&mut self) -> Result<()> {
        let location = &self.business.location;
        let options: Vec<String> = location.options().into_iter().map(String::from).collect();
        let labels: Vec<&str> = options
            .iter()
            .map(|o| if o == OTHER_CITY { "Other City" } else { o.as_str() })
            .collect();
        let default_idx = if location.is_free_text() {
            options.len() - 1
        } else {
            options
                .iter()
                .position(|o| o == location.city())
                .unwrap_or(0)
        };

        let selection = Select::with_theme(&self.theme)
            .with_prompt("Select City")
            .items(&labels)
            .default(default_idx)
            .interact()
            .into_diagnostic()?;

        let previous_text = if location.is_free_text() {
            location.city().to_string()
        } else {
            String::new()
        };
        self.business.location.select_city(&options[selection])?;

        if self.business.location.is_free_text() {
            let name = self.text("Enter City Name", &previous_text, true)?;
            self.business.location.set_free_text_city(&name)?;
        }
        Ok(())
    }

    /// Prompt for a line of text, pre-filled with the draft value
    fn text(&self, prompt: &str, default: &str, required: bool) -> Result<String> {
        let value: String = if !default.is_empty() {
            Input::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(default.to_string())
                .allow_empty(!required)
                .interact_text()
                .into_diagnostic()?
        } else {
            Input::with_theme(&self.theme)
                .with_prompt(prompt)
                .allow_empty(!required)
                .interact_text()
                .into_diagnostic()?
        };
        Ok(value)
    }
}
