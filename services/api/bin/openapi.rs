fn main() -> anyhow::Result<()> {
    parlor_api::router::write_openapi("openapi.json")
}
