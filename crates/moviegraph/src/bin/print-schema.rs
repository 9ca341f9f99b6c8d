use moviegraph_lib::graphql_api::api_schema_builder;

fn main() {
    let schema = api_schema_builder().finish();

    // Print the schema in SDL format
    println!("{}", &schema.sdl());
}
