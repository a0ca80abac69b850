use puppet_proxy::config::PuppetConfReader;
use puppet_proxy::{Environment, EnvironmentResolver};

fn main() -> Result<(), puppet_proxy::Error> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/etc/puppet/puppet.conf".to_string());

    let reader = PuppetConfReader::new(&path);
    let resolver = EnvironmentResolver::new();

    for env in Environment::all(&reader, &resolver)? {
        println!("{env}:");
        for path in env.paths() {
            println!("  {path}");
        }
    }

    Ok(())
}
