pub mod prompts;
pub mod render;

pub use prompts::{
    collect_plan_input, prompt_food, prompt_number, prompt_optional_number, prompt_recipe,
    prompt_subject, prompt_yes_no,
};
pub use render::{
    display_energy, display_preview, display_snapshots, print_json, write_meals_csv,
};
