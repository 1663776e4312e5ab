//! Command catalog: parsing `/cmd@bot args` and the static link cards.
//!
//! Market commands (`/price`, `/supply`, `/mc`) are only named here; their
//! replies need live data and are produced by the market adapter.

use crate::formatting::{escape_html, Link, LinkCard, LinkSection};

/// Split a command message into `(name, args)`.
///
/// Telegram may send `/cmd@botname arg1 ...`; the bot suffix is dropped and
/// the name lowercased. Returns `None` for text that is not a command.
pub fn parse_command(text: &str) -> Option<(String, String)> {
    let text = text.trim();
    if !text.starts_with('/') {
        return None;
    }

    let mut parts = text.splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    if cmd.is_empty() {
        return None;
    }
    Some((cmd, rest))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BotCommand {
    Start,
    Help,
    Buy,
    Websites,
    Nodes,
    Wallets,
    P2p,
    Decks,
    Trackers,
    Explorers,
    Chart,
    Whitepaper,
    Marketing,
    Links,
    Bridge,
    Github,
    Ca,
    Forums,
    PriceChat,
    Price,
    Supply,
    Mc,
}

impl BotCommand {
    pub const ALL: [BotCommand; 22] = [
        BotCommand::Start,
        BotCommand::Help,
        BotCommand::Buy,
        BotCommand::Websites,
        BotCommand::Nodes,
        BotCommand::Wallets,
        BotCommand::P2p,
        BotCommand::Decks,
        BotCommand::Trackers,
        BotCommand::Explorers,
        BotCommand::Chart,
        BotCommand::Whitepaper,
        BotCommand::Marketing,
        BotCommand::Links,
        BotCommand::Bridge,
        BotCommand::Github,
        BotCommand::Ca,
        BotCommand::Forums,
        BotCommand::PriceChat,
        BotCommand::Price,
        BotCommand::Supply,
        BotCommand::Mc,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BotCommand::Start => "start",
            BotCommand::Help => "help",
            BotCommand::Buy => "buy",
            BotCommand::Websites => "websites",
            BotCommand::Nodes => "nodes",
            BotCommand::Wallets => "wallets",
            BotCommand::P2p => "p2p",
            BotCommand::Decks => "decks",
            BotCommand::Trackers => "trackers",
            BotCommand::Explorers => "explorers",
            BotCommand::Chart => "chart",
            BotCommand::Whitepaper => "whitepaper",
            BotCommand::Marketing => "marketing",
            BotCommand::Links => "links",
            BotCommand::Bridge => "bridge",
            BotCommand::Github => "github",
            BotCommand::Ca => "ca",
            BotCommand::Forums => "forums",
            BotCommand::PriceChat => "pricechat",
            BotCommand::Price => "price",
            BotCommand::Supply => "supply",
            BotCommand::Mc => "mc",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            BotCommand::Start | BotCommand::Help => "Show this help message",
            BotCommand::Buy => "Buy $ZNN or $QSR",
            BotCommand::Websites => "Project websites",
            BotCommand::Nodes => "Public nodes",
            BotCommand::Wallets => "Download the s y r i u s wallet",
            BotCommand::P2p => "How to P2P swap in s y r i u s",
            BotCommand::Decks => "Investor decks",
            BotCommand::Trackers => "Telegram trackers",
            BotCommand::Explorers => "Blockchain explorers",
            BotCommand::Chart => "Price chart",
            BotCommand::Whitepaper => "Download the whitepaper",
            BotCommand::Marketing => "Performance marketing links",
            BotCommand::Links => "Important links",
            BotCommand::Bridge => "Bridge links and troubleshooting",
            BotCommand::Github => "Github repositories",
            BotCommand::Ca => "Ethereum contract addresses",
            BotCommand::Forums => "Community forums",
            BotCommand::PriceChat => "Price chat group",
            BotCommand::Price => "ZNN, QSR, BTC and ETH prices",
            BotCommand::Supply => "ZNN and QSR supply",
            BotCommand::Mc => "ZNN and QSR market cap",
        }
    }

    /// Whether the reply needs live market data.
    pub fn is_market(self) -> bool {
        matches!(self, BotCommand::Price | BotCommand::Supply | BotCommand::Mc)
    }

    /// Reply for commands that need no external data.
    pub fn static_reply(self) -> Option<String> {
        match self {
            BotCommand::Start | BotCommand::Help => Some(help_text()),
            BotCommand::Price | BotCommand::Supply | BotCommand::Mc => None,
            other => link_card(other).map(|card| card.to_html()),
        }
    }
}

pub fn help_text() -> String {
    let mut lines = vec![
        "<b>Zenon Network Bot</b>".to_string(),
        String::new(),
        "<b>Commands:</b>".to_string(),
    ];
    for cmd in BotCommand::ALL {
        if cmd == BotCommand::Help {
            continue;
        }
        lines.push(format!(
            "/{} - {}",
            cmd.name(),
            escape_html(cmd.description())
        ));
    }
    lines.join("\n")
}

const UNISWAP_ETH_WZNN: &str = "https://app.uniswap.org/#/swap?inputCurrency=ETH&outputCurrency=0xb2e96a63479c2edd2fd62b382c89d5ca79f572d3";
const UNISWAP_WQSR_WZNN: &str = "https://app.uniswap.org/#/swap?inputCurrency=0x96546AFE4a21515A3a30CD3fd64A70eB478DC174&outputCurrency=0xb2e96a63479c2edd2fd62b382c89d5ca79f572d3";
const SYRIUS_RELEASE: &str = "https://github.com/zenon-network/syrius/releases/tag/v0.1.0-alphanet";
const DEXTOOLS_WZNN: &str =
    "https://www.dextools.io/app/en/ether/pair-explorer/0xdac866a3796f85cb84a914d98faec052e3b5596d";
const FORUM_MARKETING: &str = "https://forum.zenon.org";
const FORUM_DEV: &str = "https://forum.hypercore.one";

fn bare(urls: &[&'static str]) -> Vec<Link> {
    urls.iter().copied().map(Link::bare).collect()
}

fn link_card(cmd: BotCommand) -> Option<LinkCard> {
    let card = match cmd {
        BotCommand::Buy => LinkCard::single(
            "Buy $ZNN or $QSR",
            vec![
                Link::new("ETH <> wZNN on Uniswap", UNISWAP_ETH_WZNN),
                Link::new("wQSR <> wZNN on Uniswap", UNISWAP_WQSR_WZNN),
            ],
        ),
        BotCommand::Websites => LinkCard::new(
            "Project Websites",
            vec![
                LinkSection::titled(
                    "Websites",
                    bare(&[
                        "https://zenon.network",
                        "https://zenon.org",
                        "https://zenon.tools",
                        "https://zenon.info",
                        "https://ask.zenon.wiki",
                        "https://my.znn.link/",
                        "https://zenonhub.io",
                        "https://attribute.zenon.org",
                    ]),
                ),
                LinkSection::titled(
                    "Explorers",
                    bare(&["https://explorer.zenon.org", "https://explorer.zenon.info"]),
                ),
                LinkSection::titled("Forums", bare(&[FORUM_MARKETING, FORUM_DEV])),
            ],
        ),
        BotCommand::Nodes => LinkCard::single(
            "Public Nodes",
            bare(&["wss://my.hc1node.com:35998", "wss://node.zenonhub.io:35998"]),
        ),
        BotCommand::Wallets => LinkCard::single(
            "Link to Wallet",
            vec![Link::new("Download s y r i u s", SYRIUS_RELEASE)],
        ),
        BotCommand::P2p => LinkCard::single(
            "P2P Swaps in s y r i u s",
            vec![Link::new(
                "How to P2P Swap in s y r i u s",
                "https://www.youtube.com/watch?v=L2UCjT9X8TI",
            )],
        ),
        BotCommand::Decks => LinkCard::single(
            "Zenon Network Decks",
            vec![
                Link::new(
                    "VC Deck Book (short)",
                    "https://d1fdloi71mui9q.cloudfront.net/hBEx1tHQxeFlmlQpZCIK_Zenon%20VC%20Deck.pdf",
                ),
                Link::new(
                    "Full Deck Book (long)",
                    "https://d1fdloi71mui9q.cloudfront.net/H8euegDSThSnnlx4tNhu_The%20Zenon%20Deck.pdf",
                ),
            ],
        ),
        BotCommand::Trackers => LinkCard::single(
            "Telegram Trackers",
            bare(&[
                "https://t.me/pillar_tracker",
                "https://t.me/az_tracker",
                "https://t.me/znnhub",
                "https://t.me/zenonwhalealerts",
                "https://t.me/wZNN_wQSR",
                "https://t.me/zenon_bridge_alerts",
            ]),
        ),
        BotCommand::Explorers => LinkCard::single(
            "Explorers",
            bare(&[
                "https://zenonhub.io/explorer",
                "https://explorer.zenon.org/",
                "https://explorer.zenon.info/",
                "https://explorer.zenon.network/",
            ]),
        ),
        BotCommand::Chart => LinkCard::single(
            "Price Chart",
            vec![Link::new("Dextools Price Chart - $wZNN", DEXTOOLS_WZNN)],
        ),
        BotCommand::Whitepaper => LinkCard::single(
            "Whitepaper",
            vec![Link::new("Download Whitepaper", "https://znn.link/whitepaper")],
        ),
        BotCommand::Marketing => LinkCard::single(
            "Performance Marketing",
            bare(&[
                "https://attribute.zenon.org",
                "https://attribute.zenon.org/link-builder",
                "https://support.zenon.org/en/collections/5920226-marketing",
            ]),
        ),
        BotCommand::Links => LinkCard::single(
            "Important Links",
            vec![
                Link::new("zenon.network", "https://zenon.network/"),
                Link::new("zenon.org", "https://zenon.org/"),
                Link::new("zenon.tools", "https://zenon.tools/"),
                Link::new("zenonhub.io", "https://zenonhub.io/"),
                Link::new("zenon.info", "https://zenon.info/"),
                Link::new(
                    "Bridge (ZNN <-> wZNN)",
                    "https://bridge.mainnet.zenon.community/",
                ),
                Link::new("Bridge Status", "https://status.bridge.zenon.community/"),
                Link::new("Buy $ZNN", UNISWAP_ETH_WZNN),
                Link::new("Marketing Forum", FORUM_MARKETING),
                Link::new("Developers Forum", FORUM_DEV),
                Link::new("Wallet", SYRIUS_RELEASE),
                Link::new("Chart", DEXTOOLS_WZNN),
            ],
        ),
        BotCommand::Bridge => LinkCard::new(
            "Zenon Network Bridge",
            vec![
                LinkSection::titled(
                    "Website",
                    vec![Link::new(
                        "https://bridge.mainnet.zenon.community/",
                        "https://bridge.mainnet.zenon.community/?referral=2f5b37014d6f3e26323c33670233014a6f2777263876255223040a3b3e76633b753b19281b123c36",
                    )],
                ),
                LinkSection::titled(
                    "Status",
                    bare(&["https://status.bridge.zenon.community/"]),
                ),
                LinkSection::titled(
                    "Generate Affiliate Link",
                    bare(&["https://affiliate.zenon.community/"]),
                ),
                LinkSection::titled(
                    "How to Bridge wZNN to ZNN",
                    vec![Link::new("Youtube Video", "https://youtu.be/Ui2x1IECwys")],
                ),
                LinkSection::titled(
                    "Troubleshooting",
                    vec![
                        Link::new(
                            "Steps to Troubleshoot",
                            "https://forum.hypercore.one/t/steps-to-troubleshoot-the-wznn-znn-bridge/237",
                        ),
                        Link::new(
                            "Check Wrap Status (ZNN > wZNN)",
                            "https://zenonhub.io/tools/api-playground?request=Bridge.getAllWrapTokenRequestsByToAddress",
                        ),
                        Link::new(
                            "Check Unwrap Status (wZNN > ZNN)",
                            "https://zenonhub.io/tools/api-playground?request=Bridge.getAllUnwrapTokenRequestsByToAddress",
                        ),
                    ],
                ),
                LinkSection::titled(
                    "Support Channel",
                    vec![Link::new(
                        "NoM Multichain Technology Feedback",
                        "https://t.me/nom_mt",
                    )],
                ),
            ],
        ),
        BotCommand::Github => LinkCard::single(
            "Github Repositories",
            bare(&[
                "https://github.com/zenon-network",
                "https://github.com/hypercore-team",
                "https://github.com/hypercore-one",
            ]),
        ),
        BotCommand::Ca => LinkCard::new(
            "Contract Addresses",
            vec![
                LinkSection::titled(
                    "$wZNN - Ethereum Contract Addresses",
                    vec![
                        Link::new(
                            "wZNN Token | 0xb2e96a63479C2Edd2FD62b382c89D5CA79f572d3",
                            "https://etherscan.io/address/0xb2e96a63479c2edd2fd62b382c89d5ca79f572d3",
                        ),
                        Link::new(
                            "Buy wZNN on Uniswap",
                            "https://app.uniswap.org/swap?inputCurrency=0xb2e96a63479c2edd2fd62b382c89d5ca79f572d3&outputCurrency=ETH",
                        ),
                        Link::new(
                            "wQSR Token | 0x96546AFE4a21515A3a30CD3fd64A70eB478DC174",
                            "https://etherscan.io/address/0x96546AFE4a21515A3a30CD3fd64A70eB478DC174",
                        ),
                        Link::new(
                            "Buy wQSR on Uniswap",
                            "https://app.uniswap.org/swap?inputCurrency=0x96546AFE4a21515A3a30CD3fd64A70eB478DC174&outputCurrency=0xb2e96a63479c2edd2fd62b382c89d5ca79f572d3",
                        ),
                    ],
                ),
                LinkSection::titled(
                    "Learn More",
                    vec![
                        Link::new(
                            "Learn About $ZNN",
                            "https://www.zenon.org/en/phases/1/tokens/znn",
                        ),
                        Link::new(
                            "Learn About $QSR",
                            "https://www.zenon.org/en/phases/1/tokens/qsr",
                        ),
                    ],
                ),
            ],
        ),
        BotCommand::Forums => LinkCard::single(
            "Community Forums",
            vec![
                Link::new(format!("Marketing - {FORUM_MARKETING}"), FORUM_MARKETING),
                Link::new(format!("Development - {FORUM_DEV}"), FORUM_DEV),
            ],
        ),
        BotCommand::PriceChat => LinkCard::single(
            "Degen Price Chat",
            vec![Link::new("NoM Community Group", "https://t.me/NoM_Community")],
        ),
        BotCommand::Start
        | BotCommand::Help
        | BotCommand::Price
        | BotCommand::Supply
        | BotCommand::Mc => return None,
    };
    Some(card)
}
