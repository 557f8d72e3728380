fn main() -> anyhow::Result<()> {
    petshop_storefront::cli::run()
}
