#![allow(dead_code)]

use contract_schema::{
    MessageDocument, MethodDocument, SchemaGraph, SchemaGraphBuilder, ServiceDocument,
};

pub fn service(name: &str, bases: &[&str], methods: &[MethodDocument]) -> ServiceDocument {
    let mut service = ServiceDocument::new(name);
    service.bases = bases.iter().map(|base| base.to_string()).collect();
    service.methods = methods.to_vec();
    service
}

pub fn method(name: &str, input: &str, output: &str) -> MethodDocument {
    MethodDocument::unary(name, input, output)
}

/// Builder preloaded with `shared.proto` declaring `shared.Empty` and `shared.Value`.
pub fn builder() -> SchemaGraphBuilder {
    let mut builder = SchemaGraphBuilder::new();
    builder
        .file("shared.proto", "shared", &[])
        .message("shared.proto", MessageDocument::new("Empty"))
        .message("shared.proto", MessageDocument::new("Value").field("value", false));
    builder
}

/// Declares `file` (package = file stem) with one service owning a single `Do<Name>` method.
pub fn layer(builder: &mut SchemaGraphBuilder, file: &str, deps: &[&str], name: &str, bases: &[&str]) {
    let package = file.trim_end_matches(".proto");
    let mut imports = vec!["shared.proto"];
    imports.extend_from_slice(deps);
    builder.file(file, package, &imports);
    builder.service(
        file,
        service(
            name,
            bases,
            &[method(&format!("Do{name}"), "shared.Empty", "shared.Value")],
        ),
    );
}

pub fn short_names(graph_services: &[contract_schema::ServiceId]) -> Vec<String> {
    graph_services
        .iter()
        .map(|id| id.as_str().rsplit('.').next().unwrap_or_default().to_string())
        .collect()
}

pub fn standalone() -> SchemaGraph {
    let mut builder = builder();
    builder
        .file("token.proto", "token", &["shared.proto"])
        .message("token.proto", MessageDocument::new("A"))
        .message("token.proto", MessageDocument::new("B"))
        .service(
            "token.proto",
            service(
                "Token",
                &[],
                &[method("M1", "token.A", "token.B"), method("M2", "token.B", "token.A")],
            ),
        );
    builder.build().unwrap()
}

pub fn two_bases(bases: &[&str]) -> SchemaGraph {
    let mut builder = builder();
    layer(&mut builder, "b1.proto", &[], "B1", &[]);
    layer(&mut builder, "b2.proto", &[], "B2", &[]);
    layer(&mut builder, "s.proto", &["b1.proto", "b2.proto"], "S", bases);
    builder.build().unwrap()
}

pub fn diamond() -> SchemaGraph {
    let mut builder = builder();
    layer(&mut builder, "c.proto", &[], "C", &[]);
    layer(&mut builder, "b1.proto", &["c.proto"], "B1", &["c.proto"]);
    layer(&mut builder, "b2.proto", &["c.proto"], "B2", &["c.proto"]);
    layer(
        &mut builder,
        "s.proto",
        &["b1.proto", "b2.proto"],
        "S",
        &["b1.proto", "b2.proto"],
    );
    builder.build().unwrap()
}

pub fn cycle() -> SchemaGraph {
    let mut builder = builder();
    layer(&mut builder, "a.proto", &["b.proto"], "A", &["b.proto"]);
    layer(&mut builder, "b.proto", &["a.proto"], "B", &["a.proto"]);
    builder.build().unwrap()
}

/// `token.proto` with a contract service and events; `empty.proto` without services;
/// `quiet.proto` with a service but no event message.
pub fn token_with_events() -> SchemaGraph {
    let mut builder = builder();
    layer(&mut builder, "acs1.proto", &[], "MethodFeeProvider", &[]);
    builder
        .file("token.proto", "token", &["shared.proto", "acs1.proto"])
        .message("token.proto", MessageDocument::new("TransferInput"))
        .message(
            "token.proto",
            MessageDocument::new("Transferred")
                .field("f1", true)
                .field("f2", false)
                .field("f3", true)
                .event(),
        )
        .message(
            "token.proto",
            MessageDocument::new("Burned")
                .field("burner", true)
                .event(),
        )
        .service(
            "token.proto",
            ServiceDocument {
                state_type: Some("TokenContractState".into()),
                ..service(
                    "TokenContract",
                    &["acs1.proto"],
                    &[
                        method("Transfer", "token.TransferInput", "shared.Empty"),
                        method("GetBalance", "token.TransferInput", "shared.Value").view(),
                        method("Watch", "token.TransferInput", "token.Transferred")
                            .streaming("server"),
                        method("Upload", "token.TransferInput", "shared.Empty")
                            .streaming("client"),
                    ],
                )
            },
        );
    builder
        .file("empty.proto", "empty", &["shared.proto"])
        .message("empty.proto", MessageDocument::new("Lonely").event());
    layer(&mut builder, "quiet.proto", &[], "Quiet", &[]);
    builder.build().unwrap()
}
