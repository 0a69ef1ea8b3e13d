//! GraphQL documents sent by the client.

pub const LOGIN_MUTATION: &str = r#"
mutation Login($email: String!, $password: String!) {
    login(email: $email, password: $password) {
        authToken
        refreshToken
        __typename
    }
    version
    __typename
}
"#;

pub const RENEW_TOKEN_MUTATION: &str = r#"
mutation RenewToken($authToken: String!, $refreshToken: String!) {
    renewToken(authToken: $authToken, refreshToken: $refreshToken) {
        authToken
        refreshToken
    }
}
"#;

pub const ME_QUERY: &str = r#"
query Me($siteReference: String) {
    me {
        id
        email
        countryCode
        advancedPaymentAmount(siteReference: $siteReference)
        treesCount
        hasCO2Compensation
        createdAt
        externalDetails {
            reference
            person {
                firstName
                lastName
            }
            address {
                addressFormatted
                street
                houseNumber
                houseNumberAddition
                zipCode
                city
            }
        }
        smartCharging {
            isActivated
            provider
            isAvailableInCountry
        }
        smartTrading {
            isActivated
            isAvailableInCountry
        }
        reference
    }
}
"#;

pub const USER_SITES_QUERY: &str = r#"
query UserSites {
    userSites {
        address {
            addressFormatted
        }
        addressHasMultipleSites
        deliveryEndDate
        deliveryStartDate
        firstMeterReadingDate
        lastMeterReadingDate
        propositionType
        reference
        segments
        status
    }
}
"#;

/// Public day-ahead prices for the Netherlands
pub const MARKET_PRICES_QUERY: &str = r#"
query MarketPrices($date: String!, $resolution: PriceResolution!) {
    marketPrices(date: $date, resolution: $resolution) {
        averageElectricityPrices {
            averageMarketPrice
            averageMarketPricePlus
            averageAllInPrice
            perUnit
            isWeighted
            __typename
        }
        electricityPrices {
            from
            till
            resolution
            marketPrice
            marketPriceTax
            sourcingMarkupPrice
            energyTaxPrice
            marketPricePlus
            allInPrice
            perUnit
            __typename
        }
        gasPrices {
            from
            till
            resolution
            marketPrice
            marketPriceTax
            sourcingMarkupPrice
            energyTaxPrice
            marketPricePlus
            allInPrice
            perUnit
            __typename
        }
    }
}
"#;

/// Public prices for Belgium. Needs the `x-country: BE` header and takes no resolution.
pub const BELGIUM_MARKET_PRICES_QUERY: &str = r#"
query MarketPrices($date: String!) {
    marketPrices(date: $date) {
        electricityPrices {
            from
            till
            resolution
            marketPrice
            marketPriceTax
            sourcingMarkupPrice
            energyTaxPrice
            marketPricePlus
            allInPrice
            perUnit
            __typename
        }
        gasPrices {
            from
            till
            resolution
            marketPrice
            marketPriceTax
            sourcingMarkupPrice
            energyTaxPrice
            marketPricePlus
            allInPrice
            perUnit
            __typename
        }
        __typename
    }
}
"#;

/// Prices for one of the customer's sites, including their own markup
pub const CUSTOMER_MARKET_PRICES_QUERY: &str = r#"
query MarketPrices($date: String!, $siteReference: String!) {
    customerMarketPrices(date: $date, siteReference: $siteReference) {
        id
        averageElectricityPrices {
            averageMarketPrice
            averageMarketPricePlus
            averageAllInPrice
            perUnit
            isWeighted
        }
        electricityPrices {
            id
            date
            from
            till
            resolution
            marketPrice
            marketPricePlus
            marketPriceTax
            sourcingMarkupPrice: consumptionSourcingMarkupPrice
            energyTaxPrice: energyTax
            allInPrice
            perUnit
            __typename
        }
        gasPrices {
            id
            date
            from
            till
            resolution
            marketPrice
            marketPricePlus
            marketPriceTax
            sourcingMarkupPrice: consumptionSourcingMarkupPrice
            energyTaxPrice: energyTax
            allInPrice
            perUnit
            __typename
        }
        __typename
    }
}
"#;
