/*!
# Oasis Gateway Command Line Interface

Derives account addresses from consensus public keys without contacting a node.

## Usage

```bash
gatewaycli help [subcommand]
```

## Available subcommands

**tmaddress**

Tendermint address of a consensus public key

**bech32**

bech32 staking address of a consensus public key

**base64tobech32**

bech32 form of a base64 encoded staking address

**bech32tobase64**

base64 form of a bech32 staking address

## Example

```bash
gatewaycli bech32 --key CVzqFIADD2Ed0khGBNf4Rvh7vSNtrL1ULTkWYQszDpc=
```
or
```bash
gatewaycli bech32tobase64 -a oasis1qzskk72k92y4duc47lqcsxhza6fahlqtlqyesw0p
```

## Dev

To run from source:

```bash
cargo run --bin gatewaycli -- tmaddress --key CVzqFIADD2Ed0khGBNf4Rvh7vSNtrL1ULTkWYQszDpc=
```
*/
use clap::{App, Arg, ArgMatches};
use oasis_gateway::{
    address::{StakingAddress, TendermintAddress},
    crypto::PublicKey,
};

fn key_arg() -> Arg<'static, 'static> {
    Arg::with_name("key")
        .short("k")
        .long("key")
        .required(true)
        .takes_value(true)
        .help("base64 encoded consensus public key")
}

fn address_arg(help: &'static str) -> Arg<'static, 'static> {
    Arg::with_name("address")
        .short("a")
        .long("address")
        .required(true)
        .takes_value(true)
        .help(help)
}

fn app() -> App<'static, 'static> {
    App::new("Oasis Gateway Command Line Interface")
        .about("Derive Oasis account addresses from the command line")
        .subcommand(
            App::new("tmaddress")
                .about("prints the Tendermint address of a public key")
                .arg(key_arg()),
        )
        .subcommand(
            App::new("bech32")
                .about("prints the bech32 staking address of a public key")
                .arg(key_arg()),
        )
        .subcommand(
            App::new("base64tobech32")
                .about("converts a base64 staking address to bech32")
                .arg(address_arg("base64 encoded staking address")),
        )
        .subcommand(
            App::new("bech32tobase64")
                .about("converts a bech32 staking address to base64")
                .arg(address_arg("bech32 staking address")),
        )
}

fn value<'a>(matches: &'a ArgMatches, name: &str) -> oasis_gateway::Result<&'a str> {
    matches
        .value_of(name)
        .ok_or_else(|| format!("missing --{}", name).into())
}

fn derive(matches: &ArgMatches) -> oasis_gateway::Result<Option<String>> {
    let output = match matches.subcommand() {
        ("tmaddress", Some(matches)) => {
            let key = PublicKey::from_text(value(matches, "key")?)?;
            TendermintAddress::from_public_key(&key).to_string()
        }
        ("bech32", Some(matches)) => {
            let key = PublicKey::from_text(value(matches, "key")?)?;
            StakingAddress::from_public_key(&key).to_bech32()?
        }
        ("base64tobech32", Some(matches)) => {
            StakingAddress::from_base64(value(matches, "address")?)?.to_bech32()?
        }
        ("bech32tobase64", Some(matches)) => {
            StakingAddress::from_bech32(value(matches, "address")?)?.to_base64()
        }
        _ => return Ok(None),
    };
    Ok(Some(output))
}

pub fn main() -> oasis_gateway::Result<()> {
    let matches = app().get_matches();
    match derive(&matches)? {
        Some(output) => println!("{}", output),
        None => println!("{}", matches.usage()),
    }
    Ok(())
}
