use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use yuca::commands::{confirm_commands_execution, run_commands, ShellCommands};
use yuca::error::YucaError;
use yuca::recipe::{cook, CookOptions, Recipe};
use yuca::renderer::MiniJinjaRenderer;
use yuca::warehouse::Warehouse;

#[test]
fn test_parse_recipe() {
    let recipe = Recipe::parse(
        r#"
template: cv
user_data: en.yml
gen_config:
  overrides:
    name: Jane
pre_cook: echo start
post_cook:
  - echo one
  - echo two
"#,
    )
    .unwrap();

    assert_eq!(recipe.template, "cv");
    assert_eq!(recipe.user_data, "en.yml");
    assert_eq!(recipe.pre_cook, ShellCommands::One("echo start".to_string()));
    assert_eq!(recipe.post_cook.as_slice(), ["echo one", "echo two"]);
    assert!(recipe.gen_config.unwrap().overrides.contains_key("name"));
}

#[test]
fn test_parse_recipe_minimal() {
    let recipe = Recipe::parse("template: cv\nuser_data: en.yml\ngen_config:\npre_cook:\n").unwrap();
    assert!(recipe.gen_config.is_none());
    assert!(recipe.pre_cook.is_empty());
    assert!(recipe.post_cook.is_empty());
}

#[test]
fn test_parse_recipe_missing_template() {
    assert!(matches!(
        Recipe::parse("user_data: en.yml\n"),
        Err(YucaError::ConfigError(_))
    ));
}

#[test]
fn test_commands_confirmation_skipped() {
    assert!(confirm_commands_execution(true, false).unwrap());
}

#[test_log::test]
fn test_commands_declined_without_terminal() {
    assert!(!confirm_commands_execution(false, false).unwrap());
}

#[test]
fn test_run_commands() {
    let temp_dir = TempDir::new().unwrap();
    let commands = ShellCommands::Many(vec!["echo hi > a.txt".to_string(), "cp a.txt b.txt".to_string()]);
    assert_eq!(run_commands(&commands, temp_dir.path()).unwrap(), 0);
    assert_eq!(fs::read_to_string(temp_dir.path().join("b.txt")).unwrap(), "hi\n");
}

#[test_log::test]
fn test_run_commands_continues_after_failure() {
    let temp_dir = TempDir::new().unwrap();
    let commands = ShellCommands::Many(vec!["exit 3".to_string(), "echo done > after.txt".to_string()]);
    assert_eq!(run_commands(&commands, temp_dir.path()).unwrap(), 1);
    assert_eq!(fs::read_to_string(temp_dir.path().join("after.txt")).unwrap(), "done\n");
}

fn setup_warehouse(root: &std::path::Path) -> Warehouse {
    let warehouse = Warehouse::init(root).unwrap();

    let template = warehouse.template_dir("cv");
    fs::create_dir_all(&template).unwrap();
    fs::write(
        template.join("config.yml"),
        "overridable_files:\n  photo: photo.txt\ntemplate_files: [cv.tex]\nscape_format: latex\n",
    )
    .unwrap();
    fs::write(template.join("cv.tex"), r"\name: {{ name }}{= hidden =}").unwrap();
    fs::write(template.join("photo.txt"), "default").unwrap();

    fs::write(warehouse.static_dir().join("me.txt"), "mine").unwrap();
    fs::write(warehouse.data_file("jane.yml"), "lang: en\nname: Jane_Doe\n").unwrap();
    fs::write(
        warehouse.recipes_dir().join("jane-cv.yml"),
        "template: cv\nuser_data: jane.yml\ngen_config:\n  files:\n    photo: me.txt\npost_cook: echo done > done.txt\n",
    )
    .unwrap();
    warehouse
}

#[test_log::test]
fn test_cook_recipe() {
    let temp_dir = TempDir::new().unwrap();
    let warehouse = setup_warehouse(&temp_dir.path().join("wh"));
    let output = temp_dir.path().join("out");

    let options = CookOptions {
        output: Some(output.clone()),
        skip_commands_check: true,
    };
    let renderer = MiniJinjaRenderer::new().unwrap();
    let report = cook(&warehouse, "jane-cv", &options, &renderer).unwrap();

    assert_eq!(report.rendered, vec![PathBuf::from("cv.tex")]);
    assert!(report.missing.is_empty());
    assert_eq!(fs::read_to_string(output.join("cv.tex")).unwrap(), r"\name: Jane\_Doe");
    assert_eq!(fs::read_to_string(output.join("photo.txt")).unwrap(), "mine");
    assert!(output.join("done.txt").exists());
}

#[test]
fn test_cook_unknown_recipe() {
    let temp_dir = TempDir::new().unwrap();
    let warehouse = setup_warehouse(temp_dir.path());
    let renderer = MiniJinjaRenderer::new().unwrap();

    let result = cook(&warehouse, "nope", &CookOptions::default(), &renderer);
    assert!(matches!(result, Err(YucaError::ConfigError(_))));
}

#[test]
fn test_cook_missing_template() {
    let temp_dir = TempDir::new().unwrap();
    let warehouse = setup_warehouse(temp_dir.path());
    fs::write(
        warehouse.recipes_dir().join("web.yml"),
        "template: web\nuser_data: jane.yml\n",
    )
    .unwrap();
    let renderer = MiniJinjaRenderer::new().unwrap();

    let result = cook(&warehouse, "web", &CookOptions::default(), &renderer);
    assert!(matches!(result, Err(YucaError::ConfigError(msg)) if msg.contains("web")));
}
