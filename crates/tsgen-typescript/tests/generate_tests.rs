use tsgen_core::{CodeGenerator, parse, transform};
use tsgen_typescript::{TypeScriptConfig, TypeScriptGenerator, generate_types};

const CHANNEL: &str = include_str!("../../tsgen-core/tests/fixtures/channel-swagger2.json");
const PETS: &str = include_str!("../../tsgen-core/tests/fixtures/pets-openapi3.yaml");

const TAGS: &str = r##"{
  "definitions": {
    "Tag": {
      "type": "object",
      "required": ["name"],
      "properties": {
        "name": { "type": "string", "description": "Display name" },
        "color": { "type": "string" }
      }
    },
    "Unused": { "type": "object", "properties": { "x": { "type": "integer" } } }
  },
  "paths": {
    "/tags/{id}": {
      "get": {
        "parameters": [{ "name": "id", "in": "path", "required": true, "type": "integer" }],
        "responses": {
          "200": {
            "schema": {
              "type": "object",
              "properties": {
                "tag": { "$ref": "#/definitions/Tag" },
                "related": { "type": "array", "items": { "$ref": "#/definitions/Tag" } },
                "extra": { "type": "object", "properties": { "count": { "type": "integer" } } }
              }
            }
          }
        }
      }
    }
  }
}"##;

#[test]
fn generate_small_document() {
    let doc = parse::from_json(TAGS).unwrap();
    let out = generate_types(&doc).unwrap();

    insta::assert_snapshot!(out, @r"
export interface Tag {
  /** Display name */
  name: string;
  color?: string;
}

export interface GetTagsRequest {
  id: number;
}

export interface GetTagsResponse {
  tag?: Tag;
  related?: Tag[];
  extra?: {
    count?: number;
  };
}
");
    assert!(out.ends_with("}\n"));
    assert!(!out.ends_with("\n\n"));
}

#[test]
fn generate_prunes_unreferenced_definition() {
    let doc = parse::from_json(TAGS).unwrap();
    let out = generate_types(&doc).unwrap();

    assert!(out.contains("export interface Tag {"));
    assert!(!out.contains("Unused"));
}

#[test]
fn generate_is_idempotent() {
    let doc = parse::from_json(CHANNEL).unwrap();
    let first = generate_types(&doc).unwrap();
    let second = generate_types(&parse::from_json(CHANNEL).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn generate_required_marker() {
    let doc = parse::from_json(CHANNEL).unwrap();
    let out = generate_types(&doc).unwrap();

    assert!(out.contains("  /** Channel id */\n  id: number;\n  name: string;\n  enabled?: boolean;"));
    assert!(out.contains("  owner?: User;\n  tags?: string[];\n  labels?: Record<string, Label>;"));
    assert!(out.contains("  page: number;\n  keyword?: string;\n  ids?: number[];"));
}

#[test]
fn generate_blocks_are_blank_line_separated() {
    let doc = parse::from_json(CHANNEL).unwrap();
    let out = generate_types(&doc).unwrap();

    let blocks: Vec<&str> = out.trim_end().split("\n\n").collect();
    assert_eq!(blocks.len(), 10);
    assert!(blocks[0].starts_with("/** A publishing channel */\nexport interface Channel {"));
    assert!(blocks[9].starts_with("export interface GetAppResourceListResponse {"));
}

#[test]
fn generate_quotes_non_identifier_keys() {
    let doc = parse::from_yaml(PETS).unwrap();
    let out = generate_types(&doc).unwrap();

    assert!(out.contains(
        "export interface GetPetsRequest {\n  /** How many items to return */\n  limit?: number;\n  /** Correlation id */\n  \"x-request-id\": string;\n}"
    ));
    assert!(out.contains("  attributes?: Record<string, any>;"));
}

#[test]
fn generate_keeps_duplicate_names() {
    let doc = parse::from_yaml(PETS).unwrap();
    let out = generate_types(&doc).unwrap();

    assert_eq!(out.matches("export interface GetPetsResponse {").count(), 2);
}

#[test]
fn generator_uses_configured_file_name() {
    let doc = parse::from_json(CHANNEL).unwrap();
    let ir = transform::transform(&doc);

    let files = TypeScriptGenerator
        .generate(&ir, &TypeScriptConfig::default())
        .unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "types.ts");

    let config = TypeScriptConfig {
        file_name: "admin_api_types.ts".to_string(),
    };
    let files = TypeScriptGenerator.generate(&ir, &config).unwrap();
    assert_eq!(files[0].path, "admin_api_types.ts");
    assert_eq!(files[0].content, generate_types(&doc).unwrap());
}

#[test]
fn generate_empty_document() {
    let doc = parse::from_json("{}").unwrap();
    assert_eq!(generate_types(&doc).unwrap(), "");
}

#[test]
fn generate_repeated_parameter_renders_once() {
    let doc = parse::from_json(
        r#"{"paths": {"/items/{id}": {"get": {"parameters": [
            {"name": "id", "in": "path", "required": true, "type": "integer"},
            {"name": "id", "in": "query", "type": "string"}
        ]}}}}"#,
    )
    .unwrap();
    let out = generate_types(&doc).unwrap();
    assert_eq!(out, "export interface GetItemsRequest {\n  id: string;\n}\n");
}
